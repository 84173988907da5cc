// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持葡萄牙语（默认, pt-BR）和英文（en）
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"pt-BR" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use collection_planner::i18n::t;
/// let msg = t("notify.save_success_title");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use collection_planner::i18n::t_with_args;
/// let msg = t_with_args("confirm.remove_text", &[("name", "Acme")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 星期名称 (chrono::Weekday → 当前语言)
pub fn weekday_name(weekday: chrono::Weekday) -> String {
    let key = match weekday {
        chrono::Weekday::Sun => "weekday.sun",
        chrono::Weekday::Mon => "weekday.mon",
        chrono::Weekday::Tue => "weekday.tue",
        chrono::Weekday::Wed => "weekday.wed",
        chrono::Weekday::Thu => "weekday.thu",
        chrono::Weekday::Fri => "weekday.fri",
        chrono::Weekday::Sat => "weekday.sat",
    };
    t(key)
}

/// 月份名称 (1..=12 → 当前语言)
pub fn month_name(month: u32) -> String {
    t(&format!("month.{}", month))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
    // 为避免测试互相干扰，这里对 i18n 相关测试串行化。
    pub(crate) static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("en");
        assert_eq!(current_locale(), "en");

        // 恢复默认语言
        set_locale("pt-BR");
        assert_eq!(current_locale(), "pt-BR");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("pt-BR");
        assert_eq!(t("notify.save_success_title"), "Salvo!");

        set_locale("en");
        assert_eq!(t("notify.save_success_title"), "Saved!");

        set_locale("pt-BR");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("pt-BR");
        let msg = t_with_args("notify.copy_success_text", &[("count", "3")]);
        assert!(msg.starts_with("3 agendamentos copiados"));

        let msg = t_with_args("confirm.remove_text", &[("name", "Acme")]);
        assert_eq!(msg, "Deseja remover \"Acme\" deste dia?");
    }

    #[test]
    fn test_calendar_names() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        set_locale("pt-BR");
        assert_eq!(weekday_name(chrono::Weekday::Sun), "Domingo");
        assert_eq!(month_name(3), "Março");
    }
}
