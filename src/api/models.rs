use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Application {
    pub identifier: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ErrorGroup {
    pub identifier: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub count: u64,
}

impl ErrorGroup {
    pub fn is_active(&self) -> bool {
        self.status == crate::constants::ACTIVE_STATUS
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CrashReportDetail {
    #[serde(default)]
    pub error: ErrorInfo,
    #[serde(default)]
    pub request: RequestInfo,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub stack_trace: Vec<StackFrame>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub line_number: i64,
    #[serde(default)]
    pub method_name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct RequestInfo {
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "httpMethod")]
    pub method: String,
}

/// Keep only the groups that can be offered for analysis
pub fn active_groups(groups: Vec<ErrorGroup>) -> Vec<ErrorGroup> {
    groups.into_iter().filter(ErrorGroup::is_active).collect()
}
