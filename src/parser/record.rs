//! Decoder for a single `CacheLine{...}` record literal

use super::parse::ParseErrorKind;
use crate::config::RECORD_PREFIX;
use crate::snapshot::{CacheLineRecord, CacheLineState};

const FIELD_COUNT: usize = 4;

/// Decode a trimmed record literal such as
/// `CacheLine{set_index: 2, tag: 5, last_used: 17, status: M}`.
///
/// Fields are matched by name and may appear in any order, but each of the
/// four must appear exactly once.
pub fn parse_record(text: &str) -> Result<CacheLineRecord, ParseErrorKind> {
    let body = text
        .trim()
        .strip_prefix(RECORD_PREFIX)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('{'))
        .and_then(|rest| rest.trim_end().strip_suffix('}'))
        .ok_or(ParseErrorKind::MalformedRecord)?;

    let fields: Vec<&str> = body.split(',').collect();
    if fields.len() != FIELD_COUNT {
        return Err(ParseErrorKind::FieldCount {
            found: fields.len(),
        });
    }

    let mut set_index = None;
    let mut tag = None;
    let mut last_used = None;
    let mut status = None;

    for field in fields {
        let (key, value) = field
            .split_once(':')
            .map(|(k, v)| (k.trim(), v.trim()))
            .ok_or_else(|| ParseErrorKind::MalformedField {
                field: field.trim().to_string(),
            })?;

        let duplicate = match key {
            "set_index" => set_index.replace(parse_number(key, value)?).is_some(),
            "tag" => tag.replace(parse_number(key, value)?).is_some(),
            "last_used" => last_used.replace(parse_number(key, value)?).is_some(),
            "status" => {
                let state = CacheLineState::from_letter(value).ok_or_else(|| {
                    ParseErrorKind::UnknownStatus {
                        value: value.to_string(),
                    }
                })?;
                status.replace(state).is_some()
            }
            _ => {
                return Err(ParseErrorKind::UnknownField {
                    key: key.to_string(),
                })
            }
        };

        if duplicate {
            return Err(ParseErrorKind::DuplicateField {
                key: key.to_string(),
            });
        }
    }

    // Four fields, all known, none repeated: every slot is filled
    match (set_index, tag, last_used, status) {
        (Some(set_index), Some(tag), Some(last_used), Some(status)) => Ok(CacheLineRecord {
            set_index,
            tag,
            last_used,
            status,
        }),
        _ => Err(ParseErrorKind::MalformedRecord),
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64, ParseErrorKind> {
    value.parse::<u64>().map_err(|_| ParseErrorKind::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}
