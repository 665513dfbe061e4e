// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::quality::Band;
use crate::domain::types::RecordState;

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use precast_qc::i18n::t_with_args;
/// let msg = t_with_args("record.locked", &[("minutes", "60")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

/// 判定等级的显示文本
pub fn band_label(band: &Band) -> String {
    match band {
        Band::Sigma(b) => t(b.i18n_key()),
        Band::Spec(b) => t(b.i18n_key()),
    }
}

/// 记录状态的显示文本
pub fn state_label(state: RecordState) -> String {
    t(state.i18n_key())
}

/// "已锁定"提示
pub fn locked_message(window_minutes: i64) -> String {
    t_with_args("record.locked", &[("minutes", &window_minutes.to_string())])
}
