//! 結果集計
//!
//! プローブ結果を1つの判定とメッセージにまとめる。失敗行の順序は完了順。

use apimon_common::types::{CheckResult, ProbeOutcome};

/// 失敗1件分の診断行
///
/// 理由に含まれる改行は空白に置き換え、1件が必ず1行になるようにする。
pub fn format_failure(request_url: &str, reason: &str) -> String {
    let reason = reason.replace(['\r', '\n'], " ");
    format!("Api URL: {}, error: {}", request_url, reason)
}

/// 失敗が0件なら健全、そうでなければ失敗行を改行で連結したメッセージ付きで不健全
pub fn aggregate(outcomes: &[ProbeOutcome]) -> CheckResult {
    let lines: Vec<String> = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            ProbeOutcome::Failed {
                request_url,
                reason,
            } => Some(format_failure(request_url, reason)),
            ProbeOutcome::Succeeded { .. } => None,
        })
        .collect();

    if lines.is_empty() {
        CheckResult::healthy()
    } else {
        CheckResult::unhealthy(lines.join("\n"))
    }
}
