pub mod pagination;
pub mod response;

pub use pagination::{
    PaginatedResponse, PaginationInfo, PaginationQuery, double_option, normalize_page,
    optional_i64,
};
pub use response::ApiResponse;
