//! Client run loop: one socket, one prompt, one position.

use futures_util::{SinkExt, StreamExt};
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use hiroba_server::domain::Position;
use hiroba_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};

use crate::args::ClientArgs;
use crate::command::{Command, parse_command};
use crate::error::ClientError;

/// Connect, join the configured space and serve the prompt until the user
/// quits or the server hangs up.
pub async fn run_client(args: ClientArgs) -> Result<(), ClientError> {
    tracing::info!("Connecting to {}", args.server);
    let (socket, _response) = connect_async(args.server.as_str()).await?;
    let (mut sink, mut stream) = socket.split();

    // Send the join frame straight away
    let join = ClientMessage::Join {
        space_id: args.space.clone(),
        token: args.token.clone(),
    };
    sink.send(Message::Text(serde_json::to_string(&join).unwrap().into()))
        .await?;

    // Commands typed at the blocking prompt arrive over this channel
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || repl_loop(cmd_tx));

    // The authoritative position, as the server last confirmed it.
    // None until the join is accepted.
    let mut position: Option<Position> = None;

    loop {
        tokio::select! {
            inbound = stream.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ServerMessage>(&text) {
                            Ok(event) => print_event(&event, &mut position, &args.space),
                            Err(e) => tracing::warn!("Ignoring unparseable frame: {}", e),
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        // A close before space-joined is the server's way of
                        // rejecting the join
                        if position.is_none() {
                            return Err(ClientError::JoinRejected);
                        }
                        println!("Disconnected from server");
                        return Ok(());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        if position.is_none() {
                            return Err(ClientError::JoinRejected);
                        }
                        return Err(ClientError::WebSocket(e));
                    }
                }
            }
            command = cmd_rx.recv() => {
                // The prompt thread is gone; nothing left to drive us
                let Some(command) = command else {
                    break;
                };
                match command {
                    Command::Move(direction) => {
                        let Some(current) = position else {
                            println!("Not in a space yet");
                            continue;
                        };
                        let (dx, dy) = direction.delta();
                        let frame = ClientMessage::Move {
                            x: current.x + dx,
                            y: current.y + dy,
                        };
                        sink.send(Message::Text(
                            serde_json::to_string(&frame).unwrap().into(),
                        ))
                        .await?;
                    }
                    Command::Pos => match position {
                        Some(current) => println!("You are at {current}"),
                        None => println!("Not in a space yet"),
                    },
                    Command::Help => print_help(),
                    Command::Quit => {
                        let _ = sink.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
        }
    }

    println!("Bye");
    Ok(())
}

/// Blocking prompt loop, run on its own thread.
fn repl_loop(cmd_tx: mpsc::UnboundedSender<Command>) {
    let mut editor = match rustyline::DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to initialize the prompt: {e}");
            let _ = cmd_tx.send(Command::Quit);
            return;
        }
    };

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(input);

                let Some(command) = parse_command(input) else {
                    println!("Unknown command '{input}' (try 'help')");
                    continue;
                };

                let is_quit = command == Command::Quit;
                if cmd_tx.send(command).is_err() || is_quit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                let _ = cmd_tx.send(Command::Quit);
                break;
            }
            Err(e) => {
                eprintln!("Prompt error: {e}");
                let _ = cmd_tx.send(Command::Quit);
                break;
            }
        }
    }
}

/// Print one presence event, updating own position on movement verdicts.
fn print_event(event: &ServerMessage, position: &mut Option<Position>, space: &str) {
    let now = chrono::Local::now().format("%H:%M:%S");
    match event {
        ServerMessage::SpaceJoined { spawn, users } => {
            *position = Some(*spawn);
            if users.is_empty() {
                println!("[{now}] Joined space '{space}' at {spawn}, nobody else here");
            } else {
                let names: Vec<&str> = users.iter().map(|u| u.user_id.as_str()).collect();
                println!(
                    "[{now}] Joined space '{space}' at {spawn}, here now: {}",
                    names.join(", ")
                );
            }
        }
        ServerMessage::UserJoined { x, y, user_id } => {
            println!("[{now}] '{user_id}' joined at ({x}, {y})");
        }
        ServerMessage::Move { x, y, user_id } => {
            println!("[{now}] '{user_id}' moved to ({x}, {y})");
        }
        ServerMessage::MovementAccepted { x, y, .. } => {
            *position = Some(Position::new(*x, *y));
            println!("[{now}] Moved to ({x}, {y})");
        }
        ServerMessage::MovementRejected { x, y, .. } => {
            // The server echoes where we actually are; fall back to it
            *position = Some(Position::new(*x, *y));
            println!("[{now}] Move rejected, still at ({x}, {y})");
        }
        ServerMessage::UserLeft { user_id } => {
            println!("[{now}] '{user_id}' left");
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  up / down / left / right  step one tile (u, d, l, r)");
    println!("  pos                       print your position (p)");
    println!("  help                      this list (h, ?)");
    println!("  quit                      leave the space (q, exit)");
}
