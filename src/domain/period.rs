// ==========================================
// 采样排班看板 - 排班周期 (年/月)
// ==========================================
// 职责: 月份合法性校验、前后月导航、当月天数
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 排班周期: 一个编辑会话对应一个 (年, 月)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "mes")]
    pub month: u32,
}

impl Period {
    /// 创建周期
    ///
    /// 月份必须在 1..=12, 且当月首日与次月首日都在 chrono 可表示的日期范围内
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        let period = Self { year, month };
        period.first_day()?;
        period.next().first_day()?;
        Some(period)
    }

    /// 当前日期所在周期
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// 上一个月 (1月 → 上年12月)
    pub fn previous(&self) -> Self {
        if self.month > 1 {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        } else {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        }
    }

    /// 下一个月 (12月 → 次年1月)
    pub fn next(&self) -> Self {
        if self.month < 12 {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        } else {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        }
    }

    /// 当月第一天
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// 当月天数
    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        match (self.first_day(), next.first_day()) {
            (Some(start), Some(end)) => end.signed_duration_since(start).num_days() as u32,
            _ => 0,
        }
    }

    /// 当月某日
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}
