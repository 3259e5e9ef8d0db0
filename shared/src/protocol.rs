use crate::envelope::ListEnvelope;
use crate::{
    Ack, Course, CoursePayload, FaqEntry, LearningRecord, LoginRequest, LoginResponse,
    ManualEntry, Notification, QuizContent, QuizResult, RegisterRequest, SendNotificationRequest,
    SubmitQuizRequest, Ticket, TicketPayload, UserAccount,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix) for endpoints without path parameters.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request must carry the bearer token.
    const AUTHENTICATED: bool = true;

    /// The concrete path; overridden by endpoints with `{id}` segments.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

impl ApiRequest for RegisterRequest {
    type Response = Ack;
    const PATH: &'static str = "/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;
}

// =========================================================
// Courses
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListCoursesRequest;

impl ApiRequest for ListCoursesRequest {
    type Response = ListEnvelope<Course>;
    const PATH: &'static str = "/course";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Create a new course (the payload is the whole body)
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCourseRequest(pub CoursePayload);

impl ApiRequest for CreateCourseRequest {
    type Response = Ack;
    const PATH: &'static str = "/course";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCourseRequest {
    #[serde(skip)]
    pub id: String,
    #[serde(flatten)]
    pub payload: CoursePayload,
}

impl ApiRequest for UpdateCourseRequest {
    type Response = Ack;
    const PATH: &'static str = "/course";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteCourseRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteCourseRequest {
    type Response = Ack;
    const PATH: &'static str = "/course";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

// =========================================================
// Users (admin)
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListUsersRequest;

impl ApiRequest for ListUsersRequest {
    /// The backend wraps this one as `{ "users": [...] }`
    type Response = ListEnvelope<UserAccount>;
    const PATH: &'static str = "/admin/all-users";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteUserRequest {
    type Response = Ack;
    const PATH: &'static str = "/admin/users";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

// =========================================================
// Tickets
// =========================================================

/// All tickets (admin view)
#[derive(Debug, Serialize, Deserialize)]
pub struct ListTicketsRequest;

impl ApiRequest for ListTicketsRequest {
    type Response = ListEnvelope<Ticket>;
    const PATH: &'static str = "/tickets";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Tickets raised by the current user
#[derive(Debug, Serialize, Deserialize)]
pub struct MyTicketsRequest;

impl ApiRequest for MyTicketsRequest {
    type Response = ListEnvelope<Ticket>;
    const PATH: &'static str = "/tickets/mytickets";
    const METHOD: HttpMethod = HttpMethod::Get;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTicketRequest(pub TicketPayload);

impl ApiRequest for CreateTicketRequest {
    type Response = Ack;
    const PATH: &'static str = "/tickets";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyTicketRequest {
    #[serde(skip)]
    pub id: String,
    pub reply: String,
}

impl ApiRequest for ReplyTicketRequest {
    type Response = Ack;
    const PATH: &'static str = "/tickets";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{}/{}/reply", Self::PATH, self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CloseTicketRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for CloseTicketRequest {
    type Response = Ack;
    const PATH: &'static str = "/tickets";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{}/{}/close", Self::PATH, self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTicketRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteTicketRequest {
    type Response = Ack;
    const PATH: &'static str = "/tickets";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

// =========================================================
// Notifications
// =========================================================

/// Notifications addressed to the current user
#[derive(Debug, Serialize, Deserialize)]
pub struct ListNotificationsRequest;

impl ApiRequest for ListNotificationsRequest {
    type Response = ListEnvelope<Notification>;
    const PATH: &'static str = "/notifications";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Every notification ever sent (admin view)
#[derive(Debug, Serialize, Deserialize)]
pub struct AllNotificationsRequest;

impl ApiRequest for AllNotificationsRequest {
    type Response = ListEnvelope<Notification>;
    const PATH: &'static str = "/notifications/all";
    const METHOD: HttpMethod = HttpMethod::Get;
}

impl ApiRequest for SendNotificationRequest {
    type Response = Ack;
    const PATH: &'static str = "/notifications/send";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkNotificationReadRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for MarkNotificationReadRequest {
    type Response = Ack;
    const PATH: &'static str = "/notifications";
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("{}/{}/read", Self::PATH, self.id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteNotificationRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for DeleteNotificationRequest {
    type Response = Ack;
    const PATH: &'static str = "/notifications";
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

// =========================================================
// Help content
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListFaqsRequest;

impl ApiRequest for ListFaqsRequest {
    type Response = ListEnvelope<FaqEntry>;
    const PATH: &'static str = "/help/faqs";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = false;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListManualsRequest;

impl ApiRequest for ListManualsRequest {
    type Response = ListEnvelope<ManualEntry>;
    const PATH: &'static str = "/help/manuals";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = false;
}

// =========================================================
// Reports
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct LearningHistoryRequest;

impl ApiRequest for LearningHistoryRequest {
    type Response = ListEnvelope<LearningRecord>;
    const PATH: &'static str = "/user/learning-history";
    const METHOD: HttpMethod = HttpMethod::Get;
}

// =========================================================
// Quiz taking
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct TakeQuizRequest {
    #[serde(skip)]
    pub id: String,
}

impl ApiRequest for TakeQuizRequest {
    type Response = QuizContent;
    const PATH: &'static str = "/quiz/take";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}/{}", Self::PATH, self.id)
    }
}

impl ApiRequest for SubmitQuizRequest {
    type Response = QuizResult;
    const PATH: &'static str = "/quiz/submit";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_segments_are_interpolated() {
        let req = DeleteCourseRequest { id: "c-7".into() };
        assert_eq!(req.path(), "/course/c-7");

        let req = ReplyTicketRequest {
            id: "t-3".into(),
            reply: "done".into(),
        };
        assert_eq!(req.path(), "/tickets/t-3/reply");
        // skipped id must not leak into the body
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"reply":"done"}"#
        );
    }

    #[test]
    fn update_body_is_the_flattened_payload() {
        let req = UpdateCourseRequest {
            id: "c-1".into(),
            payload: CoursePayload {
                title: "Rust".into(),
                category: "Dev".into(),
                subcategory: "Systems".into(),
            },
        };
        assert_eq!(req.path(), "/course/c-1");
        let body: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(body["title"], "Rust");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn auth_endpoints_skip_the_bearer_header() {
        assert!(!LoginRequest::AUTHENTICATED);
        assert!(!RegisterRequest::AUTHENTICATED);
        assert!(ListUsersRequest::AUTHENTICATED);
    }
}
