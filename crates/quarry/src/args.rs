//! Validation of the argument objects accepted by table operations.

use quarry_core::{driver::Consistency, Config, Error, FieldSet, Result, Value};
use quarry_sql::{Filter, OrderBy, Pagination, Projection};

use serde_json::Map;

/// Arguments of `find_many` and friends.
#[derive(Debug)]
pub(crate) struct FindArgs {
    pub(crate) filter: Filter,
    pub(crate) projection: Projection,
    pub(crate) order_by: OrderBy,
    pub(crate) pagination: Pagination,
    pub(crate) consistency: Option<Consistency>,
}

/// Arguments of `update` and `update_many`.
#[derive(Debug)]
pub(crate) struct UpdateArgs<'a> {
    pub(crate) filter: Filter,
    pub(crate) data: &'a Value,
}

pub(crate) struct Parser<'a> {
    pub(crate) fields: &'a FieldSet,
    pub(crate) table: &'a str,
    pub(crate) config: &'a Config,
}

impl<'a> Parser<'a> {
    pub(crate) fn find(&self, args: &Value) -> Result<FindArgs> {
        let args = object(
            args,
            &[
                "where",
                "select",
                "orderBy",
                "limit",
                "take",
                "offset",
                "skip",
                "consistency",
            ],
        )?;

        Ok(FindArgs {
            filter: self.filter(args)?,
            projection: Projection::parse(get(args, "select"), self.fields, self.table)?,
            order_by: OrderBy::parse(get(args, "orderBy"), self.fields, self.table)?,
            pagination: Pagination::parse(
                alias(args, "limit", "take")?,
                alias(args, "offset", "skip")?,
            )?,
            consistency: self.consistency(args)?,
        })
    }

    /// `where` plus an optional `consistency`, as taken by `count`.
    pub(crate) fn count(&self, args: &Value) -> Result<(Filter, Option<Consistency>)> {
        let args = object(args, &["where", "consistency"])?;
        Ok((self.filter(args)?, self.consistency(args)?))
    }

    pub(crate) fn delete(&self, args: &Value) -> Result<Filter> {
        let args = object(args, &["where"])?;
        self.filter(args)
    }

    pub(crate) fn update<'v>(&self, args: &'v Value) -> Result<UpdateArgs<'v>> {
        let map = object(args, &["where", "data"])?;
        let filter = self.filter(map)?;

        let data = match args.get("data") {
            Some(data) => data,
            None => return Err(Error::invalid_statement("update requires `data`")),
        };

        Ok(UpdateArgs { filter, data })
    }

    fn filter(&self, args: Option<&Map<String, Value>>) -> Result<Filter> {
        Filter::parse(get(args, "where"), self.fields, self.table)
    }

    fn consistency(&self, args: Option<&Map<String, Value>>) -> Result<Option<Consistency>> {
        match args.and_then(|args| args.get("consistency")) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => parse_consistency(value, self.config).map(Some),
        }
    }
}

/// Parses `"strong"`, `"none"` / `"bounded"` or
/// `{ "freshness": "<duration>", "strict": bool }`.
pub(crate) fn parse_consistency(value: &Value, config: &Config) -> Result<Consistency> {
    match value {
        Value::String(level) if level.eq_ignore_ascii_case("strong") => Ok(Consistency::Strong),
        Value::String(level)
            if level.eq_ignore_ascii_case("none") || level.eq_ignore_ascii_case("bounded") =>
        {
            Ok(Consistency::bounded(config))
        }
        Value::Object(map) => {
            let freshness = match map.get("freshness") {
                None | Some(Value::Null) => config.freshness,
                Some(Value::String(s)) => humantime::parse_duration(s).map_err(|err| {
                    Error::invalid_statement(format!("invalid freshness `{s}`: {err}"))
                })?,
                Some(other) => {
                    return Err(Error::invalid_statement(format!(
                        "`freshness` expects a duration string; got `{other}`"
                    )))
                }
            };

            let strict = match map.get("strict") {
                None | Some(Value::Null) => config.freshness_strict,
                Some(Value::Bool(strict)) => *strict,
                Some(other) => {
                    return Err(Error::invalid_statement(format!(
                        "`strict` expects a boolean; got `{other}`"
                    )))
                }
            };

            Ok(Consistency::Bounded { freshness, strict })
        }
        other => Err(Error::invalid_statement(format!(
            "unknown consistency `{other}`"
        ))),
    }
}

/// Checks the keys of an argument object. `null` means no arguments.
fn object<'v>(args: &'v Value, allowed: &[&str]) -> Result<Option<&'v Map<String, Value>>> {
    let map = match args {
        Value::Null => return Ok(None),
        Value::Object(map) => map,
        other => {
            return Err(Error::invalid_statement(format!(
                "arguments must be an object; got `{other}`"
            )))
        }
    };

    if let Some(key) = map.keys().find(|key| !allowed.contains(&key.as_str())) {
        return Err(Error::invalid_statement(format!(
            "unknown argument `{key}`"
        )));
    }

    Ok(Some(map))
}

static NULL: Value = Value::Null;

fn get<'a>(args: Option<&'a Map<String, Value>>, key: &str) -> &'a Value {
    args.and_then(|args| args.get(key)).unwrap_or(&NULL)
}

/// Reads `key`, or its alias when `key` is absent. Giving both is an error.
fn alias<'a>(
    args: Option<&'a Map<String, Value>>,
    key: &str,
    alias: &str,
) -> Result<Option<&'a Value>> {
    let Some(args) = args else {
        return Ok(None);
    };

    match (args.get(key), args.get(alias)) {
        (Some(_), Some(_)) => Err(Error::invalid_statement(format!(
            "`{key}` and `{alias}` cannot both be given"
        ))),
        (value, None) | (None, value) => Ok(value),
    }
}
