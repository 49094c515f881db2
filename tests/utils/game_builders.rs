use serde_json::{json, Value};

// ============================================================================
// Game Body Utilities
// ============================================================================

/// Builder for POST/PUT /api/games request bodies
pub struct GameBodyBuilder {
    played_at: String,
    players: Vec<Value>,
    uploaded_by: Option<String>,
}

impl GameBodyBuilder {
    pub fn new(played_at: &str) -> Self {
        Self {
            played_at: played_at.to_string(),
            players: vec![],
            uploaded_by: None,
        }
    }

    /// Adds a row with a full category breakdown:
    /// [birds, bonus, endOfRound, eggs, cachedFood, tuckedCards]
    pub fn with_player(mut self, name: &str, scores: [u32; 6]) -> Self {
        self.players.push(json!({
            "name": name,
            "birds": scores[0],
            "bonus": scores[1],
            "endOfRound": scores[2],
            "eggs": scores[3],
            "cachedFood": scores[4],
            "tuckedCards": scores[5],
        }));
        self
    }

    /// Adds a row scoring `birds` points and nothing else
    pub fn with_simple_player(self, name: &str, birds: u32) -> Self {
        self.with_player(name, [birds, 0, 0, 0, 0, 0])
    }

    pub fn with_uploader(mut self, uploaded_by: &str) -> Self {
        self.uploaded_by = Some(uploaded_by.to_string());
        self
    }

    pub fn build(self) -> Value {
        let mut body = json!({
            "playedAt": self.played_at,
            "players": self.players,
        });
        if let Some(uploaded_by) = self.uploaded_by {
            body["uploadedBy"] = json!(uploaded_by);
        }
        body
    }
}

/// The worked scorecard example: Alice 100 points, Bob 83
pub fn alice_and_bob_body(played_at: &str) -> Value {
    GameBodyBuilder::new(played_at)
        .with_player("Alice", [45, 15, 10, 18, 4, 8])
        .with_player("Bob", [38, 12, 8, 14, 6, 5])
        .build()
}
