//! End-to-end tests through the console transport.

use async_trait::async_trait;
use noughts_bot::{
    Bot, BotConfig, ChatTransport, ConsoleTransport, Dispatcher, Inbound, OutboundMessage,
    Renderer, SessionId, console,
};
use std::io::Write;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Records every message instead of delivering it.
#[derive(Debug, Default)]
struct RecordingTransport {
    sent: Mutex<Vec<(SessionId, OutboundMessage)>>,
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, chat: SessionId, message: &OutboundMessage) -> anyhow::Result<()> {
        self.sent
            .lock()
            .expect("lock")
            .push((chat, message.clone()));
        Ok(())
    }
}

async fn run_transcript(transcript: &'static str) -> String {
    let bot = Bot::new(
        Dispatcher::default(),
        Renderer::new("noughts"),
        ConsoleTransport::new(Vec::new()),
    );
    let (tx, rx) = mpsc::channel(4);

    let (queued, handled) =
        tokio::join!(console::listen(transcript.as_bytes(), tx), bot.serve(rx));

    assert_eq!(queued.expect("listen"), handled);
    String::from_utf8(bot.into_transport().into_inner()).expect("utf8")
}

#[tokio::test]
async fn test_transcript_plays_to_a_win() {
    let output = run_transcript(
        "# chat 1 wins the top row\n\
         1 /start\n\
         1 start_game\n\
         1 0,0\n1 1,1\n1 0,1\n1 1,0\n1 0,2\n\
         1 exit_game\n",
    )
    .await;

    assert!(output.starts_with(
        "[1] Welcome to noughts, a game of tic-tac-toe! Choose an action:\n\
         [1]   [New game|start_game] [Exit|exit_game]\n\
         [1] Player X to move:\n\
         [1]   [ |0,0] [ |0,1] [ |0,2]\n"
    ));
    assert!(output.contains(
        "[1] Player X wins!\n\
         [1] Do you want to play again?\n\
         [1]   [Yes|start_game] [No|exit_game]\n"
    ));
    assert!(output.ends_with("[1] Thanks for playing! Goodbye!\n"));
}

#[tokio::test]
async fn test_transcript_reports_missing_session_and_bad_data() {
    let output = run_transcript("2 1,1\n2 exit\nnot-a-chat 1,1\n").await;

    assert_eq!(
        output,
        "[2] Please start a new game with /start.\n\
         [2] Unknown action \"exit\". Send /start to see the menu.\n"
    );
}

#[tokio::test]
async fn test_rejected_move_rerenders_unchanged_board() {
    let bot = Bot::new(
        Dispatcher::default(),
        Renderer::new("noughts"),
        RecordingTransport::default(),
    );
    let chat = SessionId::new(3);

    for data in ["start_game", "1,1", "1,1"] {
        bot.handle(Inbound::new(chat, data)).await.expect("send");
    }

    let sent = bot.transport().sent.lock().expect("lock").clone();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[1], sent[2]);
    assert_eq!(sent[2].1.text, "Player O to move:");
    assert_eq!(sent[2].1.keyboard[1][1].label, "X");
}

#[tokio::test]
async fn test_press_on_finished_board_offers_restart() {
    let bot = Bot::new(
        Dispatcher::default(),
        Renderer::new("noughts"),
        RecordingTransport::default(),
    );
    let chat = SessionId::new(4);

    for data in ["start_game", "0,0", "1,1", "0,1", "1,0", "0,2", "2,2"] {
        bot.handle(Inbound::new(chat, data)).await.expect("send");
    }

    let sent = bot.transport().sent.lock().expect("lock").clone();
    let (_, last) = sent.last().expect("replies");
    assert_eq!(last.text, "Player X wins!\nDo you want to play again?");
    let data: Vec<_> = last.keyboard.concat().into_iter().map(|b| b.data).collect();
    assert_eq!(data, ["start_game", "exit_game"]);

    let game = bot.dispatcher().store().get(chat).expect("finished game kept");
    assert_eq!(game.history().len(), 5);
}

#[test]
fn test_config_file_feeds_renderer_name() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "name = \"Tic Tac Bot\"").expect("write");

    let config = BotConfig::load(Some(file.path())).expect("config");
    let renderer = Renderer::new(config.name().clone());
    let bot = Bot::new(Dispatcher::default(), renderer, RecordingTransport::default());

    let message = bot.respond(&Inbound::new(SessionId::new(1), "/start"));
    assert!(message.text.starts_with("Welcome to Tic Tac Bot"));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = BotConfig::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}
