// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line-oriented stdio transport.
//
// Each input line is one JSON method call; each output line is the reply
// envelope. A not-implemented reply is written as `null` so every call still
// produces exactly one line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use plus_navigator_channel::{ChannelClient, JsonMethodCodec, MethodCodec};
use plus_navigator_core::error::{NavigatorError, Result};
use plus_navigator_core::MethodResponse;

/// Forward calls from `input` to the hosted channel until EOF.
pub async fn serve_lines<R, W>(client: ChannelClient, mut input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        // Raw bytes: invalid UTF-8 is the codec's problem, not a fatal read.
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let reply = match client.send(line.to_vec()).await {
            Ok(reply) if reply.is_empty() => b"null".to_vec(),
            Ok(reply) => reply,
            Err(e @ NavigatorError::Codec(_)) => {
                JsonMethodCodec::encode_response(&MethodResponse::from_error(&e))?
            }
            Err(e) => return Err(e),
        };

        output.write_all(&reply).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }
    Ok(())
}
