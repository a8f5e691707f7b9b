//! # Core Framework Module
//!
//! 서비스 전역에서 공유하는 두 가지 기반 기능을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 타입별 싱글톤 인스턴스 보관
//! - **자동 레지스트리**: `inventory` 기반 컴파일 타임 서비스 등록
//! - **의존성 해결**: `Arc<T>` 필드 자동 주입
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 입력 오류, 외부 API 거부/장애/시간 초과, 저장소 오류 분류
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현으로 상태 코드 자동 매핑
//!
//! | 개념 | 구현 |
//! |------|------|
//! | 컴포넌트 자동 등록 | `#[service]` / `#[repository]` |
//! | 컨테이너 | `ServiceLocator` |
//! | 에러 → 응답 변환 | `AppError::error_response()` |

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
