//! Domain types and models

pub mod access;
pub mod alert;
pub mod envelope;
pub mod expense;
pub mod session;

pub use access::{
    Permission, PermissionRequest, Platform, PlatformProfileRole, PlatformProfileRoleRequest,
    PlatformRequest, PlatformRolePermission, PlatformRolePermissionRequest, Profile,
    ProfileEmailRequest, ProfilePasswordRequest, ProfileRequest, Role, RoleRequest,
};
pub use alert::{Alert, AlertSeverity};
pub use envelope::{
    ApiResponse, ErrorEnvelope, PageRequest, ResponseCrudInfo, ResponseMetadata, ResponsePageInfo,
    ResponseStatusInfo, SortDirection,
};
pub use expense::{
    Account, AccountRequest, AccountStatus, AccountTrend, Budget, BudgetPeriod, BudgetRequest,
    CashFlowSummary, Category, CategoryBreakdown, CategoryRequest, CategoryType, InsightsQuery,
    Transaction, TransactionFilter, TransactionRequest, TransactionType,
};
pub use session::{AuthToken, Credential, LoginRequest, ProfileId, RefreshRequest};
