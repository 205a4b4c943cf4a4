//! スキーマファイルの読み込み
//!
//! `.json` は serde_json、それ以外は serde_yaml でパースし、
//! [`ApiDescription`] に変換する。

use super::{ApiDescription, NamedExample, Operation, ParameterDecl, ParameterLocation};
use crate::error::SchemaError;
use serde::Deserialize;
use serde_yaml::{Mapping, Value as YamlValue};
use std::path::Path;
use tracing::debug;

/// パスアイテムの中でオペレーションとして扱うキー
const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// パスアイテム共通パラメータのキー
const PATH_PARAMETERS_KEY: &str = "parameters";

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    schemes: Option<Vec<String>>,
    #[serde(default)]
    host: Option<String>,
    #[serde(default, rename = "basePath")]
    base_path: Option<String>,
    #[serde(default)]
    paths: Option<Mapping>,
}

#[derive(Debug, Default, Deserialize)]
struct RawOperation {
    #[serde(default)]
    parameters: Option<Vec<RawParameter>>,
    #[serde(default)]
    consumes: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    name: String,
    #[serde(rename = "in")]
    location: ParameterLocation,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    schema: Option<RawParameterSchema>,
    #[serde(default)]
    examples: Option<Mapping>,
    #[serde(default)]
    default: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawParameterSchema {
    #[serde(default)]
    example: Option<serde_json::Value>,
}

/// スキーマファイルを読み込む
///
/// ファイルがなければ [`SchemaError::NotFound`]、パースできない・空の場合は
/// [`SchemaError::Parse`]、複数スキームが宣言されていれば
/// [`SchemaError::UnsupportedScheme`] を返す。
pub fn load(path: &Path) -> Result<ApiDescription, SchemaError> {
    if !path.exists() {
        return Err(SchemaError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| parse_error(path, e))?;
    let description = parse(path, &content)?;
    description.validate()?;

    debug!(
        path = %path.display(),
        operations = description.operations.len(),
        "Schema loaded"
    );
    Ok(description)
}

/// 文字列からスキーマをパースする（`path` は形式判定とエラー表示に使用）
pub fn parse(path: &Path, content: &str) -> Result<ApiDescription, SchemaError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let value: YamlValue = if is_json {
        serde_json::from_str(content).map_err(|e| parse_error(path, e))?
    } else {
        serde_yaml::from_str(content).map_err(|e| parse_error(path, e))?
    };

    if is_empty_document(&value) {
        return Err(parse_error(path, "document is empty"));
    }

    let raw: RawDocument = serde_yaml::from_value(value).map_err(|e| parse_error(path, e))?;
    let mut operations = Vec::new();
    for (key, item) in raw.paths.unwrap_or_default() {
        let template = key
            .as_str()
            .ok_or_else(|| parse_error(path, "path keys must be strings"))?;
        operations.extend(parse_path_item(path, template, item)?);
    }

    Ok(ApiDescription {
        schemes: raw.schemes.unwrap_or_default(),
        host: raw.host,
        base_path: raw.base_path,
        operations,
    })
}

fn parse_path_item(
    file: &Path,
    template: &str,
    item: YamlValue,
) -> Result<Vec<Operation>, SchemaError> {
    let entries = match item {
        YamlValue::Mapping(entries) => entries,
        YamlValue::Null => return Ok(Vec::new()),
        _ => {
            return Err(parse_error(
                file,
                format!("path item '{}' must be a mapping", template),
            ))
        }
    };

    let mut shared: Vec<ParameterDecl> = Vec::new();
    let mut raw_operations: Vec<(String, RawOperation)> = Vec::new();
    for (key, value) in entries {
        let Some(key) = key.as_str() else { continue };
        if key == PATH_PARAMETERS_KEY {
            let params: Option<Vec<RawParameter>> =
                serde_yaml::from_value(value).map_err(|e| parse_error(file, e))?;
            for raw in params.unwrap_or_default() {
                shared.push(convert_parameter(file, raw)?);
            }
        } else if HTTP_METHODS.contains(&key.to_ascii_lowercase().as_str()) {
            let operation = if value.is_null() {
                RawOperation::default()
            } else {
                serde_yaml::from_value(value).map_err(|e| parse_error(file, e))?
            };
            raw_operations.push((key.to_string(), operation));
        }
    }

    let mut operations = Vec::with_capacity(raw_operations.len());
    for (method, raw) in raw_operations {
        let mut own = Vec::new();
        for param in raw.parameters.unwrap_or_default() {
            own.push(convert_parameter(file, param)?);
        }
        let mut operation = Operation::new(&method, template);
        operation.parameters = merge_parameters(&shared, own);
        operation.consumes = raw.consumes.unwrap_or_default();
        operations.push(operation);
    }
    Ok(operations)
}

/// パスアイテム共通パラメータにオペレーション固有のパラメータを重ねる
///
/// (name, in) が同じものはオペレーション側で置き換える。
fn merge_parameters(shared: &[ParameterDecl], own: Vec<ParameterDecl>) -> Vec<ParameterDecl> {
    let mut merged: Vec<ParameterDecl> = shared
        .iter()
        .filter(|s| {
            !own.iter()
                .any(|o| o.name == s.name && o.location == s.location)
        })
        .cloned()
        .collect();
    merged.extend(own);
    merged
}

fn convert_parameter(file: &Path, raw: RawParameter) -> Result<ParameterDecl, SchemaError> {
    let mut examples = Vec::new();
    for (name, example) in raw.examples.unwrap_or_default() {
        let name = match name {
            YamlValue::String(name) => name,
            other => serde_yaml::to_string(&other)
                .map_err(|e| parse_error(file, e))?
                .trim()
                .to_string(),
        };
        let value = match example.get("value") {
            Some(value) => Some(serde_json::to_value(value).map_err(|e| parse_error(file, e))?),
            None => None,
        };
        examples.push(NamedExample { name, value });
    }

    Ok(ParameterDecl {
        name: raw.name,
        location: raw.location,
        required: raw.required,
        schema_example: raw.schema.and_then(|schema| schema.example),
        examples,
        default_value: raw.default,
    })
}

fn is_empty_document(value: &YamlValue) -> bool {
    match value {
        YamlValue::Null => true,
        YamlValue::Mapping(map) => map.is_empty(),
        YamlValue::Sequence(seq) => seq.is_empty(),
        YamlValue::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn parse_error(path: &Path, reason: impl ToString) -> SchemaError {
    SchemaError::Parse {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
