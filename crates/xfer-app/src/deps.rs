//! # Application Dependencies / 应用依赖
//!
//! Parameter grouping for [`AppState`](crate::AppState) construction. Every
//! port is required; there are no defaults and no build steps.

use std::sync::Arc;

use xfer_core::ports::{
    AccountPort, AdminAccessionPort, AdminSessionPort, ReferenceDataPort, SessionCredentialPort,
    SubmissionPort,
};

/// Ports the stores talk through.
/// store 所使用的端口。
pub struct AppDeps {
    // Gateway / 远程网关
    pub reference_data: Arc<dyn ReferenceDataPort>,
    pub submission: Arc<dyn SubmissionPort>,
    pub admin: Arc<dyn AdminAccessionPort>,
    pub accounts: Arc<dyn AccountPort>,

    // Authentication boundary / 认证边界
    pub credentials: Arc<dyn SessionCredentialPort>,
    pub admin_session: Arc<dyn AdminSessionPort>,
}
