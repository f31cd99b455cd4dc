use serde::Serialize;

// 统一API响应结构
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

// 便捷构造函数
impl<T> ApiResponse<T> {
    pub fn success(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn created(data: T, message: &str) -> Self {
        Self {
            success: true,
            code: 201,
            message: message.to_string(),
            data: Some(data),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            code: 200,
            message: message.to_string(),
            data: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn validation_error(errors: Vec<ErrorDetail>) -> Self {
        Self {
            success: false,
            code: 400,
            message: "Validation failed".to_string(),
            data: None,
            errors: Some(errors),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            success: false,
            code: 400,
            message: message.to_string(),
            data: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: "BAD_REQUEST".to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        Self {
            success: false,
            code: 401,
            message: message.to_string(),
            data: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: "UNAUTHORIZED".to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            success: false,
            code: 404,
            message: message.to_string(),
            data: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: "NOT_FOUND".to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self {
            success: false,
            code: 409,
            message: message.to_string(),
            data: None,
            errors: Some(vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn unavailable(message: &str) -> Self {
        Self {
            success: false,
            code: 503,
            message: message.to_string(),
            data: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: "UNAVAILABLE".to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            success: false,
            code: 500,
            message: message.to_string(),
            data: None,
            errors: Some(vec![ErrorDetail {
                field: None,
                code: "INTERNAL_ERROR".to_string(),
                message: message.to_string(),
            }]),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// 业务错误码常量
pub mod error_codes {
    // 认证相关
    pub const AUTH_INVALID_CHANNEL_CODE: &str = "AUTH_001";
    pub const AUTH_INVALID_SESSION: &str = "AUTH_002";
    pub const AUTH_SESSION_EXPIRED: &str = "AUTH_003";

    // 团队相关
    pub const TEAM_NOT_FOUND: &str = "TEAM_001";
    pub const TEAM_CODE_EXISTS: &str = "TEAM_002";

    // 预约相关
    pub const APPOINTMENT_NOT_FOUND: &str = "TERMIN_001";
    pub const APPOINTMENT_INVALID_STATUS: &str = "TERMIN_002";

    // 通知相关
    pub const NOTIFICATION_NOT_FOUND: &str = "NOTIFY_001";
    pub const NOTIFICATION_INVALID_TYPE: &str = "NOTIFY_002";
    pub const NOTIFICATION_FOREIGN_APPOINTMENT: &str = "NOTIFY_003";

    // 系统相关
    pub const SYSTEM_DATABASE_ERROR: &str = "SYSTEM_001";
    pub const SYSTEM_CACHE_ERROR: &str = "SYSTEM_002";
}
