// src/api/params.rs

use tracing::debug;
use url::form_urlencoded;

use super::error::RequestError;
use crate::query::{PageRequest, ProgramFilter, ProgramQuery, TimeWindow};

/// Raw `/api/programs` query parameters.
///
/// Scalar parameters take their first occurrence; `days` (also spelled `days[]`)
/// collects every occurrence in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub region: Option<String>,
    pub time: Option<String>,
    pub days: Vec<String>,
}

impl ProgramParams {
    pub fn parse(raw: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match &*key {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "region" => &mut params.region,
                "time" => &mut params.time,
                "days" | "days[]" => {
                    params.days.push(value.into_owned());
                    continue;
                }
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// Validate into a [`ProgramQuery`], using `default_limit` when `limit` is absent.
    pub fn into_query(self, default_limit: usize) -> Result<ProgramQuery, RequestError> {
        let page = parse_int("page", self.page.as_deref(), 1)?;
        let limit = parse_int("limit", self.limit.as_deref(), default_limit)?;
        let page = PageRequest::new(page, limit).ok_or(RequestError::InvalidPage { page, limit })?;

        let time = self.time.as_deref().and_then(|t| match t.parse::<TimeWindow>() {
            Ok(w) => Some(w),
            Err(e) => {
                debug!("ignoring time filter: {}", e);
                None
            }
        });

        Ok(ProgramQuery {
            filter: ProgramFilter {
                region: self.region,
                time,
                days: self.days,
            },
            page,
        })
    }
}

fn parse_int(name: &'static str, raw: Option<&str>, default: usize) -> Result<usize, RequestError> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| RequestError::InvalidInteger {
            name,
            value: v.to_string(),
        }),
    }
}
