use serde::{Deserialize, Serialize};
use std::fmt;

/// 空气质量等级，顺序与模型输出索引一一对应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    #[serde(rename = "a_Good")]
    Good,
    #[serde(rename = "b_Moderate")]
    Moderate,
    #[serde(rename = "c_Unhealthy_for_Sensitive_Groups")]
    UnhealthyForSensitiveGroups,
    #[serde(rename = "d_Unhealthy")]
    Unhealthy,
    #[serde(rename = "e_Very_Unhealthy")]
    VeryUnhealthy,
    #[serde(rename = "f_Severe")]
    Severe,
}

impl AqiCategory {
    pub const ALL: [AqiCategory; 6] = [
        AqiCategory::Good,
        AqiCategory::Moderate,
        AqiCategory::UnhealthyForSensitiveGroups,
        AqiCategory::Unhealthy,
        AqiCategory::VeryUnhealthy,
        AqiCategory::Severe,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// 模型训练时使用的类别键
    pub fn key(self) -> &'static str {
        match self {
            AqiCategory::Good => "a_Good",
            AqiCategory::Moderate => "b_Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "c_Unhealthy_for_Sensitive_Groups",
            AqiCategory::Unhealthy => "d_Unhealthy",
            AqiCategory::VeryUnhealthy => "e_Very_Unhealthy",
            AqiCategory::Severe => "f_Severe",
        }
    }

    /// AQI数值区间
    pub fn range(self) -> &'static str {
        match self {
            AqiCategory::Good => "0-50",
            AqiCategory::Moderate => "51-100",
            AqiCategory::UnhealthyForSensitiveGroups => "101-150",
            AqiCategory::Unhealthy => "151-200",
            AqiCategory::VeryUnhealthy => "201-300",
            AqiCategory::Severe => "301-500",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Severe => "Hazardous",
        }
    }

    /// 户外活动建议
    pub fn description(self) -> &'static str {
        match self {
            AqiCategory::Good => "Enjoy your usual outdoor activities",
            AqiCategory::Moderate => {
                "Extremely sensitive children and adults should refrain from strenuous outdoor activities."
            }
            AqiCategory::UnhealthyForSensitiveGroups => {
                "Sensitive children and adults should limit prolonged outdoor activity."
            }
            AqiCategory::Unhealthy => {
                "Sensitive groups should avoid outdoor exposure and others should limit prolonged outdoor activity."
            }
            AqiCategory::VeryUnhealthy => {
                "Sensitive groups should stay indoors and others should avoid outdoor activity."
            }
            AqiCategory::Severe => "Everyone should stay indoors and avoid physical activity.",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_exactly_six_entries() {
        assert_eq!(AqiCategory::COUNT, 6);
        for i in 0..6 {
            assert_eq!(AqiCategory::from_index(i).unwrap().index(), i);
        }
        assert_eq!(AqiCategory::from_index(6), None);
    }

    #[test]
    fn keys_and_ranges_are_unique() {
        let keys: HashSet<_> = AqiCategory::ALL.iter().map(|c| c.key()).collect();
        let ranges: HashSet<_> = AqiCategory::ALL.iter().map(|c| c.range()).collect();
        assert_eq!(keys.len(), 6);
        assert_eq!(ranges.len(), 6);
    }

    #[test]
    fn fourth_category_is_unhealthy() {
        let category = AqiCategory::from_index(3).unwrap();
        assert_eq!(category.key(), "d_Unhealthy");
        assert_eq!(category.range(), "151-200");
        assert_eq!(category.label(), "Unhealthy");
    }

    #[test]
    fn severe_is_labelled_hazardous() {
        assert_eq!(AqiCategory::Severe.label(), "Hazardous");
        assert_eq!(AqiCategory::Severe.to_string(), "Hazardous (301-500)");
    }

    #[test]
    fn serializes_as_training_key() {
        let json = serde_json::to_string(&AqiCategory::UnhealthyForSensitiveGroups).unwrap();
        assert_eq!(json, "\"c_Unhealthy_for_Sensitive_Groups\"");
        for category in AqiCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json.trim_matches('"'), category.key());
        }
    }
}
