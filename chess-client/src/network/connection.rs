//! 网络连接管理
//!
//! 使用 protocol 库的传输层抽象

use protocol::{Command, Connection, Connector, Result, WsConnection, WsConnector};

/// 网络连接包装器
///
/// 会话在单线程事件循环中运行，命令先进入会话的待发送队列，
/// 每处理完一个事件由循环统一写出。
pub struct NetworkConnection<C: Connection = WsConnection> {
    inner: C,
}

impl NetworkConnection<WsConnection> {
    /// 连接到服务器
    pub async fn connect(url: &str) -> Result<Self> {
        let conn = WsConnector.connect(url).await?;
        tracing::info!("Connected to server: {}", url);
        Ok(Self::from_connection(conn))
    }
}

impl<C: Connection> NetworkConnection<C> {
    /// 包装已建立的连接
    pub fn from_connection(inner: C) -> Self {
        Self { inner }
    }

    /// 按顺序发送队列中的命令
    pub async fn flush(&mut self, commands: Vec<Command>) -> Result<()> {
        for command in commands {
            tracing::debug!("Sending {}", command);
            self.inner.send(&command).await?;
        }
        Ok(())
    }

    /// 接收一条服务端消息
    pub async fn recv(&mut self) -> Result<String> {
        self.inner.recv().await
    }

    /// 断开连接
    pub async fn close(&mut self) -> Result<()> {
        self.inner.close().await
    }

    pub fn peer_addr(&self) -> Option<String> {
        self.inner.peer_addr()
    }
}
