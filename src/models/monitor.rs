use serde::{Deserialize, Serialize};

/// 监控状态（对外统一格式）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    Up,
    Down,
    Paused,
    Unknown,
}

impl MonitorState {
    pub const PAUSED: i64 = 0;
    pub const NOT_CHECKED_YET: i64 = 1;
    pub const UP: i64 = 2;
    pub const SEEMS_DOWN: i64 = 8;
    pub const DOWN: i64 = 9;

    pub fn from_code(code: i64) -> Self {
        match code {
            Self::UP => MonitorState::Up,
            Self::SEEMS_DOWN | Self::DOWN => MonitorState::Down,
            Self::PAUSED => MonitorState::Paused,
            _ => MonitorState::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    pub id: String,
    pub name: String,
    pub url: String,
    pub status: MonitorState,
    pub uptime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
}

/// 解析平均响应时间，只保留大于0的有效数值
pub fn parse_response_time(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|ms| ms.is_finite() && *ms > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_states() {
        let states: Vec<_> = [0, 1, 2, 8, 9]
            .into_iter()
            .map(MonitorState::from_code)
            .collect();
        assert_eq!(
            states,
            vec![
                MonitorState::Paused,
                MonitorState::Unknown,
                MonitorState::Up,
                MonitorState::Down,
                MonitorState::Down,
            ]
        );
        assert_eq!(MonitorState::from_code(-1), MonitorState::Unknown);
        assert_eq!(MonitorState::from_code(42), MonitorState::Unknown);
    }

    #[test]
    fn response_time_only_kept_when_positive() {
        assert_eq!(parse_response_time("0"), None);
        assert_eq!(parse_response_time(""), None);
        assert_eq!(parse_response_time("abc"), None);
        assert_eq!(parse_response_time("-5"), None);
        assert_eq!(parse_response_time("NaN"), None);
        assert_eq!(parse_response_time("123.4"), Some(123.4));
    }

    #[test]
    fn serializes_camel_case_and_omits_missing_response_time() {
        let status = MonitorStatus {
            id: "111".into(),
            name: "Homepage".into(),
            url: "https://example.com".into(),
            status: MonitorState::Up,
            uptime: "99.98".into(),
            response_time: None,
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "up");
        assert!(json.get("responseTime").is_none());

        let with_time = MonitorStatus {
            response_time: Some(87.5),
            ..status
        };
        let json = serde_json::to_value(&with_time).unwrap();
        assert_eq!(json["responseTime"], 87.5);
    }
}
