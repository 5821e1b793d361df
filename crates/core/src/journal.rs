use crate::content::ContentPack;
use crate::types::{Cell, Choice, ChoicePromptId};

use serde::{Deserialize, Serialize};

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub build_id: String,
    pub content_hash: u64,
    pub seed: u64,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    /// Frame at which the input was accepted.
    pub tick_boundary: u64,
    pub payload: InputPayload,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputPayload {
    Choice { prompt_id: ChoicePromptId, choice: Choice },
    PlaceAlien { cell: Cell },
    RemoveAlien { cell: Cell },
}

impl InputJournal {
    pub fn new(seed: u64, content: &ContentPack) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: "dev".to_string(),
            content_hash: content.content_hash(),
            seed,
            inputs: Vec::new(),
        }
    }

    /// Appends an accepted input, numbering it after the last record.
    pub fn append(&mut self, tick_boundary: u64, payload: InputPayload) -> &InputRecord {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, tick_boundary, payload });
        &self.inputs[self.inputs.len() - 1]
    }

    pub fn append_choice(&mut self, tick_boundary: u64, prompt_id: ChoicePromptId, choice: Choice) {
        self.append(tick_boundary, InputPayload::Choice { prompt_id, choice });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowKind;

    #[test]
    fn appended_records_are_numbered_in_order() {
        let mut journal = InputJournal::new(5, &ContentPack::default());
        journal.append(0, InputPayload::PlaceAlien { cell: Cell::new(RowKind::Kick, 0) });
        journal.append_choice(0, ChoicePromptId(0), Choice::StartWave);
        journal.append(40, InputPayload::RemoveAlien { cell: Cell::new(RowKind::Kick, 0) });

        let seqs: Vec<u64> = journal.inputs.iter().map(|record| record.seq).collect();
        assert_eq!(seqs, vec![0, 1, 2]);
        assert_eq!(journal.inputs[2].tick_boundary, 40);
        assert_eq!(journal.content_hash, ContentPack::default().content_hash());
    }
}
