// ==========================================
// 采样排班看板 - 宽松反序列化工具
// ==========================================
// 职责: 兼容历史数据中的多种字段表示
// - 布尔标志: true/false, 0/1, "0"/"1", null
// - 客户ID/日期: 整数或数字字符串
// ==========================================

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

/// 解析布尔标志 (缺失/null 视为 false)
///
/// 配合 `#[serde(default, deserialize_with = "de_flag")]` 使用
pub fn de_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::Number(n)) => Ok(n.as_f64().map(|v| v != 0.0).unwrap_or(false)),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "" | "0" | "false" => Ok(false),
            "1" | "true" => Ok(true),
            other => Err(de::Error::custom(format!("无效的布尔标志: {}", other))),
        },
        Some(other) => Err(de::Error::custom(format!("无效的布尔标志: {}", other))),
    }
}

/// 解析整数ID (整数或数字字符串)
pub fn de_lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| de::Error::custom(format!("无法解析为整数: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("无法解析为整数: {}", s))),
        other => Err(de::Error::custom(format!("无法解析为整数: {}", other))),
    }
}

/// 解析月内日期 (整数或数字字符串)
pub fn de_lenient_day<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = de_lenient_i64(deserializer)?;
    u32::try_from(raw).map_err(|_| de::Error::custom(format!("无效的日期: {}", raw)))
}
