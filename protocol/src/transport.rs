//! 传输层抽象
//!
//! 提供 Connector/Connection traits 使上层会话与具体传输实现解耦。
//! 默认实现基于 WebSocket 文本帧，每帧是一条完整的逻辑消息。

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::codec::Codec;
use crate::error::{ProtocolError, Result};
use crate::message::Command;
use crate::{CONNECT_TIMEOUT, DEFAULT_PORT, WS_PATH};

/// 网络配置
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub host: String,
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl NetworkConfig {
    /// 对局的 WebSocket 地址
    pub fn game_url(&self, game_id: &str) -> String {
        format!("ws://{}:{}{}/{}", self.host, self.port, WS_PATH, game_id)
    }
}

/// 连接抽象 trait（核心抽象，用于会话层）
#[async_trait]
pub trait Connection: Send {
    /// 发送命令
    async fn send(&mut self, command: &Command) -> Result<()>;

    /// 接收一条完整的消息
    async fn recv(&mut self) -> Result<String>;

    /// 关闭连接
    async fn close(&mut self) -> Result<()>;

    /// 获取远端地址
    fn peer_addr(&self) -> Option<String>;
}

/// 连接器 trait（客户端使用）
#[async_trait]
pub trait Connector: Send + Sync {
    type Conn: Connection;

    /// 建立连接
    async fn connect(&self, url: &str) -> Result<Self::Conn>;
}

// ============================================================================
// WebSocket 实现
// ============================================================================

/// WebSocket 连接器
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    type Conn = WsConnection;

    async fn connect(&self, url: &str) -> Result<Self::Conn> {
        let (stream, _response) = timeout(CONNECT_TIMEOUT, connect_async(url))
            .await
            .map_err(|_| ProtocolError::ConnectionTimeout)??;

        let peer_addr = match stream.get_ref() {
            MaybeTlsStream::Plain(tcp) => tcp.peer_addr().ok().map(|a| a.to_string()),
            _ => None,
        };

        Ok(WsConnection::new(stream, peer_addr))
    }
}

/// WebSocket 连接
pub struct WsConnection<S = MaybeTlsStream<TcpStream>> {
    stream: WebSocketStream<S>,
    peer_addr: Option<String>,
}

impl<S> WsConnection<S>
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send,
{
    /// 从已完成握手的流创建
    pub fn new(stream: WebSocketStream<S>, peer_addr: Option<String>) -> Self {
        Self { stream, peer_addr }
    }

    /// 发送一行原始文本
    pub async fn send_text(&mut self, text: String) -> Result<()> {
        self.stream.send(Message::Text(text)).await?;
        Ok(())
    }
}

#[async_trait]
impl<S> Connection for WsConnection<S>
where
    S: tokio::io::AsyncRead + tokio::io::AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, command: &Command) -> Result<()> {
        let line = Codec::encode(command);
        tracing::trace!("-> {}", line);
        self.send_text(line).await
    }

    /// 可以被 `select!` 取消：Ping 的应答由 tungstenite 排队，
    /// 在下一次读写时发出，这里只等待下一帧。
    async fn recv(&mut self) -> Result<String> {
        while let Some(msg) = self.stream.next().await {
            match msg? {
                Message::Text(text) => {
                    tracing::trace!("<- {:?}", text);
                    return Ok(text);
                }
                Message::Close(_) => return Err(ProtocolError::ConnectionClosed),
                // Ping/Pong 与二进制帧不属于本协议
                _ => {}
            }
        }
        Err(ProtocolError::ConnectionClosed)
    }

    async fn close(&mut self) -> Result<()> {
        match self.stream.close(None).await {
            Ok(()) | Err(tokio_tungstenite::tungstenite::Error::ConnectionClosed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn peer_addr(&self) -> Option<String> {
        self.peer_addr.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Square;

    #[test]
    fn test_game_url() {
        let config = NetworkConfig::default();
        assert_eq!(config.game_url("abc"), "ws://127.0.0.1:8080/ws/abc");
    }

    #[tokio::test]
    async fn test_ws_connection() {
        // 启动监听
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // 服务端：收到一条命令后回复棋盘
        let server_handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();

            let msg = ws.next().await.unwrap().unwrap();
            assert_eq!(msg, Message::Text("\\get_possible_moves e2".to_string()));

            ws.send(Message::Ping(vec![1])).await.unwrap();
            ws.send(Message::Text("possible moves for:\ne2\ne3 e4".to_string()))
                .await
                .unwrap();

            // 客户端继续读取时自动应答 Ping
            let pong = ws.next().await.unwrap().unwrap();
            assert_eq!(pong, Message::Pong(vec![1]));
            ws.close(None).await.unwrap();
        });

        // 客户端连接
        let url = format!("ws://{}/ws/game", addr);
        let mut conn = WsConnector.connect(&url).await.unwrap();
        assert_eq!(conn.peer_addr(), Some(addr.to_string()));

        let e2 = Square::from_notation("e2").unwrap();
        conn.send(&Command::GetPossibleMoves(e2)).await.unwrap();

        // 跳过 Ping，收到文本
        let text = conn.recv().await.unwrap();
        assert_eq!(text, "possible moves for:\ne2\ne3 e4");

        // 服务端关闭
        assert!(matches!(conn.recv().await, Err(ProtocolError::ConnectionClosed)));

        server_handle.await.unwrap();
    }
}
