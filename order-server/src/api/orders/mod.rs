//! 订单 API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | GET | 订单列表 (Sales 只看自己的) |
//! | /api/orders | POST | 创建订单 |
//! | /api/orders/{id} | PUT | 部分更新 |
//! | /api/orders/{id} | DELETE | 删除 |
//! | /api/orders/export | GET | 导出 xlsx |
//! | /api/orders/bulk | POST | 批量导入 (multipart) |
//! | /api/orders/{view} | GET | 部门工作清单 |

mod handler;

use axum::extract::State;
use axum::{Router, routing::get, routing::post, routing::put};

use crate::core::ServerState;
use crate::orders::Projection;

pub fn router() -> Router<ServerState> {
    let mut router = Router::new()
        .route("/api/orders", get(handler::list).post(handler::create))
        .route("/api/orders/export", get(handler::export))
        .route("/api/orders/bulk", post(handler::bulk_import))
        .route("/api/orders/{id}", put(handler::update).delete(handler::delete));

    for view in Projection::ALL {
        router = router.route(
            &format!("/api/orders/{}", view.slug()),
            get(move |state: State<ServerState>| handler::projection(state, view)),
        );
    }
    router
}
