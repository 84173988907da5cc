// ==========================================
// 采样排班看板 - 操作员提示
// ==========================================
// 职责: 确认对话框与通知的抽象
// 说明: 成功通知 2000ms 自动关闭, 错误通知 4000ms
// ==========================================

use crate::i18n::{t, t_with_args};
use std::io::{BufRead, Write};

/// 成功通知自动关闭时间 (毫秒)
pub const SUCCESS_TIMER_MS: u64 = 2000;

/// 错误通知自动关闭时间 (毫秒)
pub const ERROR_TIMER_MS: u64 = 4000;

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

impl NotificationLevel {
    pub fn timer_ms(&self) -> u64 {
        match self {
            NotificationLevel::Success => SUCCESS_TIMER_MS,
            NotificationLevel::Error => ERROR_TIMER_MS,
        }
    }
}

/// 可自动关闭的通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub text: Option<String>,
    pub timer_ms: u64,
}

impl Notification {
    pub fn success(title: impl Into<String>, text: Option<String>) -> Self {
        Self::with_level(NotificationLevel::Success, title, text)
    }

    pub fn error(title: impl Into<String>, text: Option<String>) -> Self {
        Self::with_level(NotificationLevel::Error, title, text)
    }

    fn with_level(level: NotificationLevel, title: impl Into<String>, text: Option<String>) -> Self {
        Self {
            level,
            title: title.into(),
            text,
            timer_ms: level.timer_ms(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// 确认对话框内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub text: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl ConfirmPrompt {
    /// 移除分配确认 (文本包含客户名称)
    pub fn remove_client(name: &str) -> Self {
        Self {
            title: t("confirm.remove_title"),
            text: t_with_args("confirm.remove_text", &[("name", name)]),
            confirm_label: t("confirm.remove_confirm"),
            cancel_label: t("confirm.cancel"),
        }
    }

    /// 复制上月确认 (会覆盖未保存的排班)
    pub fn copy_previous() -> Self {
        Self {
            title: t("confirm.copy_title"),
            text: t("confirm.copy_text"),
            confirm_label: t("confirm.copy_confirm"),
            cancel_label: t("confirm.cancel"),
        }
    }
}

/// 操作员提示 Trait
///
/// 由界面层实现; 命令行使用 `ConsolePrompt`
pub trait OperatorPrompt: Send + Sync {
    /// 请求确认,返回 true 表示继续
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;

    /// 显示通知
    fn notify(&self, notification: Notification);
}

// ==========================================
// 命令行实现
// ==========================================

/// 终端提示
///
/// `assume_yes` 为 true 时自动确认 (对应 `--yes`)
#[derive(Debug, Clone, Default)]
pub struct ConsolePrompt {
    assume_yes: bool,
}

impl ConsolePrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl OperatorPrompt for ConsolePrompt {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        if self.assume_yes {
            tracing::debug!("自动确认: {}", prompt.title);
            return true;
        }

        let mut stdout = std::io::stdout();
        let _ = write!(
            stdout,
            "{}\n{}\n[{} / {}] (s/N): ",
            prompt.title, prompt.text, prompt.confirm_label, prompt.cancel_label
        );
        let _ = stdout.flush();

        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "s" | "sim" | "y" | "yes")
    }

    fn notify(&self, notification: Notification) {
        let line = match &notification.text {
            Some(text) => format!("{}: {}", notification.title, text),
            None => notification.title.clone(),
        };
        if notification.is_error() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{set_locale, tests::LOCALE_TEST_LOCK};

    #[test]
    fn test_notification_timers() {
        let ok = Notification::success("Salvo!", None);
        assert_eq!(ok.timer_ms, 2000);
        assert!(!ok.is_error());

        let err = Notification::error("Erro ao Salvar", Some("conflict".to_string()));
        assert_eq!(err.timer_ms, 4000);
        assert!(err.is_error());
    }

    #[test]
    fn test_remove_prompt_names_client() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("pt-BR");
        let prompt = ConfirmPrompt::remove_client("Acme");
        assert_eq!(prompt.title, "Remover agendamento?");
        assert!(prompt.text.contains("\"Acme\""));
    }

    #[test]
    fn test_console_prompt_assume_yes() {
        let prompt = ConsolePrompt::new(true);
        assert!(prompt.confirm(&ConfirmPrompt::copy_previous()));
    }
}
