//! オペレーションからのリクエスト合成
//!
//! パス置換 → クエリ → ヘッダー → Content-Type → フォームボディの順に組み立てる。
//! `formData` / `body` パラメータはボディ組み立て時のみ参照する。

use crate::error::{MonitorResult, ParameterError, SchemaError};
use crate::schema::{
    resolve_value, should_include, ApiDescription, Operation, ParameterDecl, ParameterLocation,
};
use apimon_common::types::{render_param_value, ApiCall, ParamMap, RequestBody};

/// ボディを組み立てるHTTPメソッド
const BODY_METHODS: [&str; 3] = ["POST", "PUT", "PATCH"];

/// 合成オプション
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// 任意パラメータも含める
    pub include_optional_parameters: bool,
    /// 除外した任意パラメータも値を解決できることを要求する
    pub strict_parameters: bool,
}

impl SynthesisOptions {
    /// 任意パラメータを含めるかを指定して作成
    pub fn new(include_optional_parameters: bool) -> Self {
        Self {
            include_optional_parameters,
            strict_parameters: false,
        }
    }

    /// strictモードを設定
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_parameters = strict;
        self
    }

    fn includes(&self, param: &ParameterDecl) -> bool {
        should_include(param, self.include_optional_parameters)
    }
}

/// 1オペレーション分のリクエストを合成
pub fn synthesize(
    base_url: &str,
    operation: &Operation,
    options: SynthesisOptions,
) -> MonitorResult<ApiCall> {
    if options.strict_parameters {
        ensure_excluded_resolvable(operation, options)?;
    }

    let url = substitute_path_parameters(join_url(base_url, &operation.path), operation, options)?;
    let query = collect_query(operation, options)?;
    let headers = collect_headers(operation, options)?;
    let body = build_body(operation, options)?;

    Ok(ApiCall {
        method: operation.method.to_ascii_uppercase(),
        url,
        query,
        headers,
        body,
    })
}

/// basePath とパスの間の `/` を1つにそろえて連結
fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn substitute_path_parameters(
    mut url: String,
    operation: &Operation,
    options: SynthesisOptions,
) -> MonitorResult<String> {
    for param in selected(operation, ParameterLocation::Path, options) {
        let placeholder = format!("{{{}}}", param.name);
        if !url.contains(&placeholder) {
            return Err(ParameterError::MissingPathPlaceholder {
                path: operation.path.clone(),
                name: param.name.clone(),
            }
            .into());
        }
        let value = render_param_value(&resolve_value(param)?);
        url = url.replacen(&placeholder, &value, 1);
    }
    Ok(url)
}

fn collect_query(operation: &Operation, options: SynthesisOptions) -> MonitorResult<ParamMap> {
    let mut query = ParamMap::new();
    for param in selected(operation, ParameterLocation::Query, options) {
        query.insert(param.name.clone(), resolve_value(param)?);
    }
    Ok(query)
}

/// 同名ヘッダーは先に宣言されたものを優先する
fn collect_headers(operation: &Operation, options: SynthesisOptions) -> MonitorResult<ParamMap> {
    let mut headers = ParamMap::new();
    for param in selected(operation, ParameterLocation::Header, options) {
        let value = resolve_value(param)?;
        headers.entry(param.name.clone()).or_insert(value);
    }

    match operation.consumes.as_slice() {
        [] => {}
        [content_type] => {
            headers
                .entry("Content-Type".to_string())
                .or_insert_with(|| content_type.clone().into());
        }
        _ => {
            return Err(SchemaError::UnsupportedContentType {
                path: operation.path.clone(),
                method: operation.method.clone(),
            }
            .into())
        }
    }
    Ok(headers)
}

fn build_body(
    operation: &Operation,
    options: SynthesisOptions,
) -> MonitorResult<Option<RequestBody>> {
    let method = operation.method.to_ascii_uppercase();
    if !BODY_METHODS.contains(&method.as_str()) || operation.parameters.is_empty() {
        return Ok(None);
    }

    let mut form_params = ParamMap::new();
    for param in operation.parameters.iter().filter(|p| options.includes(p)) {
        match param.location {
            ParameterLocation::FormData => {
                form_params.insert(param.name.clone(), resolve_value(param)?);
            }
            ParameterLocation::Body => {
                return Err(ParameterError::UnsupportedBodyLocation {
                    path: operation.path.clone(),
                    name: param.name.clone(),
                }
                .into())
            }
            _ => {}
        }
    }

    if form_params.is_empty() {
        return Ok(None);
    }
    Ok(Some(RequestBody::form(form_params)))
}

fn ensure_excluded_resolvable(
    operation: &Operation,
    options: SynthesisOptions,
) -> MonitorResult<()> {
    for param in operation.parameters.iter().filter(|p| !options.includes(p)) {
        if matches!(
            param.location,
            ParameterLocation::Path
                | ParameterLocation::Query
                | ParameterLocation::Header
                | ParameterLocation::FormData
        ) {
            resolve_value(param)?;
        }
    }
    Ok(())
}

fn selected(
    operation: &Operation,
    location: ParameterLocation,
    options: SynthesisOptions,
) -> impl Iterator<Item = &ParameterDecl> {
    operation
        .parameters
        .iter()
        .filter(move |p| p.location == location && options.includes(p))
}

/// オペレーションを1件ずつ合成するイテレータ
///
/// 取り出されるまで合成しないため、全リクエストを一度に保持しない。
/// 最初からやり直す場合は新しく作り直す。
pub struct RequestIter<'a> {
    operations: std::slice::Iter<'a, Operation>,
    base_url: String,
    options: SynthesisOptions,
}

impl<'a> RequestIter<'a> {
    /// API記述の全オペレーションを対象に作成
    pub fn new(
        description: &'a ApiDescription,
        base_url: impl Into<String>,
        options: SynthesisOptions,
    ) -> Self {
        Self {
            operations: description.operations.iter(),
            base_url: base_url.into(),
            options,
        }
    }
}

impl Iterator for RequestIter<'_> {
    type Item = MonitorResult<ApiCall>;

    fn next(&mut self) -> Option<Self::Item> {
        let operation = self.operations.next()?;
        Some(synthesize(&self.base_url, operation, self.options))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.operations.size_hint()
    }
}
