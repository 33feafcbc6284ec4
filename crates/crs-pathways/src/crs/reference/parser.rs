use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::crs::calculator::{Factor, PointsReferenceRow};
use crate::crs::draws::DrawRecord;
use crate::crs::pathways::ProgramRecord;

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source)
}

pub(crate) fn parse_points_rows<R: Read>(source: R) -> Result<Vec<PointsReferenceRow>, csv::Error> {
    let mut rows = Vec::new();
    for record in reader(source).deserialize::<PointsRow>() {
        let row = record?;
        rows.push(PointsReferenceRow {
            factor: Factor::from(row.factor),
            level_key: row.level_key,
            points_with_spouse: row.points_with_spouse,
            points_no_spouse: row.points_no_spouse,
        });
    }
    Ok(rows)
}

pub(crate) fn parse_programs<R: Read>(source: R) -> Result<Vec<ProgramRecord>, csv::Error> {
    let mut programs = Vec::new();
    for record in reader(source).deserialize::<ProgramRow>() {
        let row = record?;
        programs.push(ProgramRecord {
            province: row.province,
            program: row.program,
            summary: row.summary.unwrap_or_default(),
            url: row.url,
            status: row.status.unwrap_or_default(),
            key_requirements: row.key_requirements,
            crs_cutoff: row.crs_cutoff,
            is_active: row.is_active.unwrap_or(true),
        });
    }
    Ok(programs)
}

pub(crate) fn parse_draws<R: Read>(source: R) -> Result<Vec<DrawRecord>, csv::Error> {
    let mut draws = Vec::new();
    for record in reader(source).deserialize::<DrawRow>() {
        let row = record?;
        draws.push(DrawRecord {
            draw_number: row.draw_number,
            draw_date: row.draw_date,
            round_type: row.round_type,
            invitations: row.invitations,
            crs_cutoff: row.crs_cutoff,
        });
    }
    Ok(draws)
}

#[derive(Debug, Deserialize)]
struct PointsRow {
    factor: String,
    level_key: String,
    points_with_spouse: u32,
    points_no_spouse: u32,
}

#[derive(Debug, Deserialize)]
struct ProgramRow {
    province: String,
    program: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    summary: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    url: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    key_requirements: Option<String>,
    #[serde(default, deserialize_with = "optional_cutoff")]
    crs_cutoff: Option<u32>,
    #[serde(default, deserialize_with = "optional_flag")]
    is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct DrawRow {
    draw_number: u32,
    #[serde(deserialize_with = "iso_date")]
    draw_date: NaiveDate,
    round_type: String,
    invitations: u32,
    crs_cutoff: u32,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn optional_cutoff<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        None => Ok(None),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "n/a" | "none" | "null" | "-" => Ok(None),
            value => value
                .parse::<u32>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid CRS cutoff '{raw}'"))),
        },
    }
}

fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        None => Ok(None),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" => Ok(Some(true)),
            "false" | "f" | "no" | "n" | "0" => Ok(Some(false)),
            _ => Err(serde::de::Error::custom(format!(
                "invalid boolean flag '{raw}'"
            ))),
        },
    }
}

fn iso_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| serde::de::Error::custom(format!("invalid draw date '{raw}' ({err})")))
}
