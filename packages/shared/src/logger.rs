//! Logging setup utilities for the pipechat binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers every pipechat crate plus the binary itself. The log level
/// can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "pipechat_server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use pipechat_shared::logger::setup_logger;
///
/// setup_logger("pipechat-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets = vec!["pipechat_shared", "pipechat_server", "pipechat_client"];
    if !targets.contains(&binary_target.as_str()) {
        targets.push(&binary_target);
    }

    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_lists_binary_crate_once() {
        // テスト項目: バイナリ名がクレート名と同じ場合、フィルタに重複して含まれない
        // given (前提条件):
        let binary_name = "pipechat-server";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert_eq!(
            filter,
            "pipechat_shared=debug,pipechat_server=debug,pipechat_client=debug"
        );
    }

    #[test]
    fn test_default_filter_adds_other_binary_names() {
        // テスト項目: クレート名と異なるバイナリ名はフィルタに追加される
        // given (前提条件):
        let binary_name = "chat-bench";

        // when (操作):
        let filter = default_filter(binary_name, "warn");

        // then (期待する結果):
        assert_eq!(
            filter,
            "pipechat_shared=warn,pipechat_server=warn,pipechat_client=warn,chat_bench=warn"
        );
    }
}
