//! Quiz question bank
//!
//! Star pickups pause the action and pose one of these. The bank is
//! read-only: the simulation samples it uniformly at random and never
//! mutates it. [`QuizBank::builtin`] ships the default set; alternative
//! banks load from JSON (an array of question objects).

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index of the correct entry in `options`
    pub answer: usize,
}

/// An ordered, immutable set of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizBank {
    pub questions: Vec<Question>,
}

impl QuizBank {
    /// The shipped bank: six database-trivia questions.
    pub fn builtin() -> Self {
        let q = |id: u32, prompt: &str, options: [&str; 4], answer: usize| Question {
            id,
            prompt: prompt.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            answer,
        };
        Self {
            questions: vec![
                q(
                    1,
                    "Who was MySQL named after, following its co-founder Monty Widenius?",
                    [
                        "His wife, MySQLa",
                        "His daughter, My",
                        "His son, SQL",
                        "His pet owl, Hedwig",
                    ],
                    1,
                ),
                q(
                    2,
                    "Which SQL command is used to retrieve data from a database?",
                    ["INSERT INTO", "UPDATE", "SELECT", "DELETE FROM"],
                    2,
                ),
                q(
                    3,
                    "What is the correct PHP loop to iterate through a mysqli recordset?",
                    [
                        "for each ($row in $result)",
                        "while ($row = mysqli_fetch_assoc($result))",
                        "loop ($result as $row)",
                        "mysqli_repeat($result)",
                    ],
                    1,
                ),
                q(
                    4,
                    "Which procedural function is used to establish a connection in PHP?",
                    ["mysqli_connect()", "db_open()", "new MySQLi()", "pdo_connect()"],
                    0,
                ),
                q(
                    5,
                    "Which command would you use to remove a specific record from a table?",
                    ["DROP RECORD", "DELETE FROM", "REMOVE", "ERASE"],
                    1,
                ),
                q(
                    6,
                    "How do you check if a mysqli connection failed in procedural style?",
                    [
                        "if ($conn->error)",
                        "if (!mysqli_error($conn))",
                        "if (!$conn) { die('Connection failed: ' . mysqli_connect_error()); }",
                        "try { connect() }",
                    ],
                    2,
                ),
            ],
        }
    }

    /// Parse a bank from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Uniform random draw; `None` only when the bank is empty
    pub fn sample(&self, rng: &mut impl Rng) -> Option<&Question> {
        if self.questions.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.questions.len());
        Some(&self.questions[index])
    }
}
