//! 网络通信模块
//!
//! 单线程事件循环：服务端消息与终端输入交替处理，
//! 每个事件处理完毕后写出待发送命令并重绘界面。

mod connection;

pub use connection::*;

use std::io::Write;

use protocol::{Connection, ProtocolError, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::game::{GameSession, InputError, UserInput};
use crate::ui;

/// 会话结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// 用户退出（quit 或输入结束）
    Quit,
    /// 服务端关闭连接
    ServerClosed,
}

/// 运行会话直到用户退出或连接关闭
pub async fn run_session<C, R, W>(
    conn: &mut NetworkConnection<C>,
    session: &mut GameSession,
    input: R,
    out: &mut W,
    show_labels: bool,
) -> Result<SessionEnd>
where
    C: Connection,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    session.on_open();
    conn.flush(session.drain_outbox()).await?;
    repaint(session, out, show_labels)?;

    let mut lines = input.lines();
    loop {
        tokio::select! {
            // 服务端消息优先
            biased;

            received = conn.recv() => match received {
                Ok(text) => session.handle_message(&text),
                Err(ProtocolError::ConnectionClosed) => {
                    tracing::info!("Server closed the connection");
                    return Ok(SessionEnd::ServerClosed);
                }
                Err(e) => return Err(e),
            },

            line = lines.next_line() => match line? {
                Some(line) => match UserInput::parse(&line) {
                    Ok(UserInput::Quit) => break,
                    Ok(input) => session.apply_input(input),
                    Err(InputError::Empty) => continue,
                    Err(e) => session.notify(e.to_string()),
                },
                None => {
                    tracing::debug!("Input closed");
                    break;
                }
            },
        }

        conn.flush(session.drain_outbox()).await?;
        repaint(session, out, show_labels)?;
    }

    conn.close().await?;
    Ok(SessionEnd::Quit)
}

fn repaint<W: Write>(session: &GameSession, out: &mut W, show_labels: bool) -> Result<()> {
    writeln!(out, "{}", ui::screen(session.view(), session.promotion(), show_labels))?;
    out.flush()?;
    Ok(())
}
