/// 监控ID分隔符，与查询参数格式一致
pub const MONITOR_ID_DELIMITER: &str = "-";

/// 生成监控状态缓存键（保留请求中的ID顺序）
pub fn monitor_status_key(monitor_ids: &[String]) -> String {
    monitor_ids.join(MONITOR_ID_DELIMITER)
}

/// 解析 `monitors` 查询参数，忽略空项
pub fn parse_monitor_ids(raw: &str) -> Vec<String> {
    raw.split(MONITOR_ID_DELIMITER)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_order_sensitive() {
        let a = monitor_status_key(&["111".to_string(), "222".to_string()]);
        let b = monitor_status_key(&["222".to_string(), "111".to_string()]);
        assert_eq!(a, "111-222");
        assert_ne!(a, b);
    }

    #[test]
    fn parse_drops_empty_segments() {
        assert_eq!(parse_monitor_ids("111-222"), vec!["111", "222"]);
        assert_eq!(parse_monitor_ids("111--222-"), vec!["111", "222"]);
        assert!(parse_monitor_ids("").is_empty());
        assert!(parse_monitor_ids(" - ").is_empty());
    }
}
