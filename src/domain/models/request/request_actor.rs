use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

/// 요청을 수행한 사용자를 전달하는 헤더
pub const ACTOR_HEADER: &str = "X-User-Id";

/// 요청을 수행한 사용자 정보
///
/// 인증은 이 서비스의 범위 밖이므로, 앞단의 게이트웨이가 설정한
/// `X-User-Id` 헤더를 그대로 신뢰합니다. 값은 `created_by`, `updated_by`,
/// `deleted_by` 필드와 감사 로그의 행위자로만 사용됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestActor(pub Option<String>);

impl RequestActor {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user(user_id: impl Into<String>) -> Self {
        Self(Some(user_id.into()))
    }

    /// 행위자 ID (익명이면 None)
    pub fn user_id(&self) -> Option<&str> {
        self.0.as_deref()
    }

    fn from_header(req: &HttpRequest) -> Self {
        let user_id = req
            .headers()
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Self(user_id)
    }
}

/// ActixWeb FromRequest trait 구현
///
/// 헤더가 없어도 실패하지 않고 익명 행위자를 반환합니다.
impl FromRequest for RequestActor {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(RequestActor::from_header(req)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_actor_from_header() {
        let req = TestRequest::default()
            .insert_header((ACTOR_HEADER, "  user-42 "))
            .to_http_request();

        assert_eq!(RequestActor::from_header(&req).user_id(), Some("user-42"));
    }

    #[test]
    fn test_missing_or_blank_header_is_anonymous() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(RequestActor::from_header(&req), RequestActor::anonymous());

        let req = TestRequest::default()
            .insert_header((ACTOR_HEADER, "   "))
            .to_http_request();
        assert_eq!(RequestActor::from_header(&req).user_id(), None);
    }
}
