use crate::game::grid::{Cell, Direction};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Start,
    Input { direction: Direction },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Init {
        grid_width: i32,
        grid_height: i32,
        cell_size: u32,
        high_score: i64,
    },
    Intro {
        snake: Vec<Cell>,
        direction: Direction,
    },
    #[serde(rename_all = "camelCase")]
    State {
        snake: Vec<Cell>,
        direction: Direction,
        food: Cell,
        bonus_food: Option<Cell>,
        score: i64,
        high_score: i64,
    },
    #[serde(rename_all = "camelCase")]
    GameOver { score: i64, high_score: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_start_message() {
        let message: ClientMessage = serde_json::from_str(r#"{"type":"start"}"#).unwrap();
        assert!(matches!(message, ClientMessage::Start));
    }

    #[test]
    fn parses_an_input_message() {
        let message: ClientMessage =
            serde_json::from_str(r#"{"type":"input","direction":"left"}"#).unwrap();
        assert!(matches!(
            message,
            ClientMessage::Input {
                direction: Direction::Left
            }
        ));
    }

    #[test]
    fn unknown_messages_fail_to_parse() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"teleport"}"#).is_err());
        assert!(serde_json::from_str::<ClientMessage>("not json at all").is_err());
    }

    #[test]
    fn state_messages_use_the_renderer_facing_field_names() {
        let message = ServerMessage::State {
            snake: vec![Cell { x: 5, y: 5 }],
            direction: Direction::Right,
            food: Cell { x: 6, y: 5 },
            bonus_food: None,
            score: 10,
            high_score: 40,
        };
        let payload = serde_json::to_string(&message).unwrap();
        assert!(payload.contains(r#""type":"state""#));
        assert!(payload.contains(r#""bonusFood":null"#));
        assert!(payload.contains(r#""highScore":40"#));
        assert!(payload.contains(r#""direction":"right""#));
    }

    #[test]
    fn game_over_messages_are_tagged_game_over() {
        let message = ServerMessage::GameOver {
            score: 20,
            high_score: 90,
        };
        let payload = serde_json::to_string(&message).unwrap();
        assert!(payload.contains(r#""type":"gameOver""#));
    }
}
