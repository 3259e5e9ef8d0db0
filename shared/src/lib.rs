use serde::{Deserialize, Serialize};

pub mod claims;
pub mod date;
pub mod envelope;
pub mod error;
pub mod guard;
pub mod listing;
pub mod protocol;
pub mod quiz;
pub mod session;

pub use date::{DateRange, Timestamp};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// LocalStorage 中持久化令牌的键（唯一跨刷新保留的客户端状态）
pub const STORAGE_TOKEN_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";
/// 上传文件（缩略图、手册）挂载的路径前缀
pub const UPLOADS_PATH: &str = "/uploads";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserAccount {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "dateOfBirth", default)]
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub subcategory: String,
}

/// 创建/更新课程时提交的字段（不含服务端生成的 id）
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CoursePayload {
    pub title: String,
    pub category: String,
    pub subcategory: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    #[default]
    Open,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ticket {
    #[serde(rename = "_id")]
    pub id: String,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(rename = "userEmail", default)]
    pub user_email: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

/// 新工单只需要主题和描述，其余字段由服务端补全
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TicketPayload {
    pub subject: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FaqEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ManualEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// 相对路径，如 `/uploads/manuals/getting-started.pdf`
    #[serde(rename = "fileUrl")]
    pub file_url: String,
}

/// 学习历史报表的一行（服务端已聚合，客户端只做筛选和分页）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LearningRecord {
    pub course: String,
    #[serde(default)]
    pub lesson: String,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<String>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<String>,
    #[serde(rename = "lessonStatus", default)]
    pub lesson_status: String,
    #[serde(rename = "quizScore", default)]
    pub quiz_score: Option<f64>,
    #[serde(rename = "quizStatus", default)]
    pub quiz_status: Option<String>,
    #[serde(rename = "quizDate", default)]
    pub quiz_date: Option<String>,
    #[serde(default)]
    pub attempts: Option<u32>,
}

impl LearningRecord {
    /// 起始日期解析为时间戳，供日期窗口筛选使用
    pub fn started_timestamp(&self) -> Option<Timestamp> {
        self.start_date
            .as_deref()
            .and_then(Timestamp::parse_rfc3339)
    }
}

// =========================================================
// 认证载荷 (Auth Payloads)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserAccount,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RegisterRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: String,
}

// =========================================================
// 测验载荷 (Quiz Payloads)
// =========================================================

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuizQuestion {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct QuizContent {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "courseName", default)]
    pub course_name: String,
    #[serde(rename = "passPercentage", default)]
    pub pass_percentage: u32,
    /// 限时秒数；0 表示不限时
    #[serde(default)]
    pub duration: u32,
    pub questions: Vec<QuizQuestion>,
}

/// 提交测验：未作答的题目按 null 发送，由服务端计为错误
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubmitQuizRequest {
    pub id: String,
    pub answers: Vec<Option<usize>>,
    #[serde(rename = "startedAt")]
    pub started_at: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizOutcome {
    Pass,
    Fail,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct QuizResult {
    pub status: QuizOutcome,
    pub score: f64,
}

// =========================================================
// 通知发送载荷
// =========================================================

/// `user_ids` 为 None 时发送给全体用户
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SendNotificationRequest {
    pub title: String,
    pub message: String,
    #[serde(rename = "userIds", skip_serializing_if = "Option::is_none")]
    pub user_ids: Option<Vec<String>>,
}

/// 变更类接口的宽容应答：有的端点返回 `{ message }`，有的返回
/// 完整记录，有的只有状态码。这里只保留公共部分。
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}
