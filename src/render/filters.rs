//! Helpers available to changelog templates
//!
//! Both helpers are registered as filters and as functions:
//!
//! ```text
//! {{ entry.title | wrap_indent(width=80, indent=3) }}
//! {{ wrap_indent(text=entry.title, width=80, indent=3) }}
//! {{ par | capitalize }}
//! ```
//!
//! `capitalize` replaces tera's built-in filter of the same name, which also
//! lowercases the rest of the string.

use crate::utils;
use std::collections::HashMap;
use tera::{Error, Result, Tera, Value};

pub fn register(tera: &mut Tera) {
  tera.register_filter("wrap_indent", wrap_indent_filter);
  tera.register_filter("capitalize", capitalize_filter);
  tera.register_function("wrap_indent", wrap_indent_function);
  tera.register_function("capitalize", capitalize_function);
}

fn wrap_indent_filter(value: &Value, args: &HashMap<String, Value>) -> Result<Value> {
  let text = as_text("wrap_indent", "value", value)?;
  wrap_indent_with(text, args)
}

fn wrap_indent_function(args: &HashMap<String, Value>) -> Result<Value> {
  let text = required("wrap_indent", "text", args)?;
  wrap_indent_with(as_text("wrap_indent", "text", text)?, args)
}

fn wrap_indent_with(text: &str, args: &HashMap<String, Value>) -> Result<Value> {
  let width = as_count("wrap_indent", "width", required("wrap_indent", "width", args)?)?;
  let indent = match args.get("indent") {
    Some(v) => as_count("wrap_indent", "indent", v)?,
    None => 0,
  };
  Ok(Value::String(utils::wrap_indent(text, width, indent)))
}

fn capitalize_filter(value: &Value, _: &HashMap<String, Value>) -> Result<Value> {
  let text = as_text("capitalize", "value", value)?;
  Ok(Value::String(utils::capitalize(text)))
}

fn capitalize_function(args: &HashMap<String, Value>) -> Result<Value> {
  let text = as_text("capitalize", "text", required("capitalize", "text", args)?)?;
  Ok(Value::String(utils::capitalize(text)))
}

fn required<'a>(helper: &str, key: &str, args: &'a HashMap<String, Value>) -> Result<&'a Value> {
  args
    .get(key)
    .ok_or_else(|| Error::msg(format!("`{}` requires a `{}` argument", helper, key)))
}

fn as_text<'a>(helper: &str, key: &str, value: &'a Value) -> Result<&'a str> {
  value
    .as_str()
    .ok_or_else(|| Error::msg(format!("`{}` expected `{}` to be a string, got {}", helper, key, value)))
}

fn as_count(helper: &str, key: &str, value: &Value) -> Result<usize> {
  value
    .as_u64()
    .and_then(|n| usize::try_from(n).ok())
    .ok_or_else(|| {
      Error::msg(format!(
        "`{}` expected `{}` to be a non-negative integer, got {}",
        helper, key, value
      ))
    })
}
