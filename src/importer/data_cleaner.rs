// ==========================================
// 供应链风险感知 - 数据清洗器
// ==========================================
// 职责: TRIM / NULL 标准化 / 宽松数值转换 / Y-N 标记解析
// 红线: 清洗永不报错,异常值一律落到文档化的默认值
// ==========================================

pub struct DataCleaner;

impl DataCleaner {
    /// 空白字符串视为 NULL
    pub fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 文本 → 数值
    ///
    /// 空值、无法解析、非有限值（inf/NaN）一律为 0
    pub fn to_num(&self, value: &str) -> f64 {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return 0.0;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => 0.0,
        }
    }

    /// 文本 → 整数（向下取整）
    pub fn to_int(&self, value: &str) -> i64 {
        // 向下取整: 其余评分项与等级阈值均为整数, floor 后的等级与小数直接累加一致
        self.to_num(value).floor() as i64
    }

    /// Y/N 标记：仅大小写不敏感的 "Y" 为真
    pub fn is_yes_flag(&self, value: &str) -> bool {
        value.trim().eq_ignore_ascii_case("Y")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ".to_string())), None);
        assert_eq!(cleaner.normalize_null(Some("".to_string())), None);
        assert_eq!(
            cleaner.normalize_null(Some("  value  ".to_string())),
            Some("value".to_string())
        );
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_to_num() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.to_num("12"), 12.0);
        assert_eq!(cleaner.to_num(" 3.5 "), 3.5);
        assert_eq!(cleaner.to_num("1e3"), 1000.0);
        assert_eq!(cleaner.to_num(""), 0.0);
        assert_eq!(cleaner.to_num("n/a"), 0.0);
        assert_eq!(cleaner.to_num("inf"), 0.0);
        assert_eq!(cleaner.to_num("NaN"), 0.0);
    }

    #[test]
    fn test_to_int() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.to_int("4"), 4);
        assert_eq!(cleaner.to_int("4.0"), 4);
        assert_eq!(cleaner.to_int("4.9"), 4);
        assert_eq!(cleaner.to_int("-0.5"), -1);
        assert_eq!(cleaner.to_int("-3"), -3);
        assert_eq!(cleaner.to_int("high"), 0);
    }

    #[test]
    fn test_is_yes_flag() {
        let cleaner = DataCleaner;
        assert!(cleaner.is_yes_flag("Y"));
        assert!(cleaner.is_yes_flag("y"));
        assert!(cleaner.is_yes_flag(" Y "));
        assert!(!cleaner.is_yes_flag("N"));
        assert!(!cleaner.is_yes_flag("YES"));
        assert!(!cleaner.is_yes_flag("1"));
        assert!(!cleaner.is_yes_flag(""));
    }
}
