//! Port bundle handed to [`App::new`](crate::App::new).
//!
//! 端口集合：由 bootstrap 组装，App 只读取。

use std::sync::Arc;

use mn_core::ports::{AuthPort, ClockPort, LaunchFlagPort, NavigationPort, ProfileRepositoryPort};

/// Every port is required; the composition root picks the adapters.
pub struct AppDeps {
    // Backend dependencies / 后端依赖
    pub auth: Arc<dyn AuthPort>,
    pub profiles: Arc<dyn ProfileRepositoryPort>,

    // Local storage dependencies / 本地存储依赖
    pub launch_flag: Arc<dyn LaunchFlagPort>,

    // UI dependencies / UI 依赖
    pub navigation: Arc<dyn NavigationPort>,

    // System dependencies / 系统依赖
    pub clock: Arc<dyn ClockPort>,
}
