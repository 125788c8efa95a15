//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증/정리, ObjectId 파싱, 검색어 이스케이프
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::parse_object_id;
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! let id = parse_object_id("65f0c0ffee0000000000beef")?;
//! print_boxed_title("System Initialized");
//! ```

pub mod string_utils;
pub mod display_terminal;
