//! Socket.IO 接入
//!
//! 客户端连接后发送 `join {userId, role}`，被加入 `global` 房间和自己的用户房间。

use shared::message::{GLOBAL_ROOM, JoinRequest};
use socketioxide::SocketIo;
use socketioxide::extract::{Data, SocketRef};
use socketioxide::layer::SocketIoLayer;

/// 创建 Socket.IO layer 并注册默认命名空间
pub fn build_layer() -> (SocketIoLayer, SocketIo) {
    let (layer, io) = SocketIo::new_layer();
    io.ns("/", on_connect);
    (layer, io)
}

async fn on_connect(socket: SocketRef) {
    tracing::debug!(sid = %socket.id, "Live client connected");

    socket.on("join", on_join);
    socket.on_disconnect(|socket: SocketRef| async move {
        tracing::debug!(sid = %socket.id, "Live client disconnected");
    });
}

async fn on_join(socket: SocketRef, Data(join): Data<JoinRequest>) {
    socket.join(GLOBAL_ROOM);
    if let Some(user_id) = join.user_id.as_deref().filter(|id| !id.is_empty()) {
        socket.join(user_id.to_string());
    }
    tracing::info!(
        sid = %socket.id,
        user_id = join.user_id.as_deref().unwrap_or("-"),
        role = join.role.as_deref().unwrap_or("-"),
        "Live client joined"
    );
}
