//! パラメータ値の解決
//!
//! 値の取得元は `schema.example` → `examples` の先頭要素の `value` → `default` の順。
//! `null` は未指定として扱う。

use super::ParameterDecl;
use crate::error::ParameterError;
use serde_json::Value;

/// パラメータをリクエストに含めるか
///
/// 必須パラメータは常に含め、任意パラメータは `include_optional` のときのみ含める。
pub fn should_include(param: &ParameterDecl, include_optional: bool) -> bool {
    param.required || include_optional
}

/// パラメータの値を決定
pub fn resolve_value(param: &ParameterDecl) -> Result<Value, ParameterError> {
    if let Some(example) = present(param.schema_example.as_ref()) {
        return Ok(example.clone());
    }
    if let Some(first) = param.examples.first() {
        if let Some(value) = present(first.value.as_ref()) {
            return Ok(value.clone());
        }
    }
    if let Some(default) = present(param.default_value.as_ref()) {
        return Ok(default.clone());
    }
    Err(ParameterError::Unresolvable(param.name.clone()))
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}
