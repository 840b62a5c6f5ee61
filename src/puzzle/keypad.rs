/// Digits in a keypad code
pub const CODE_LENGTH: usize = 4;

/// Result of pressing a keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// Digit stored, this many digits now in the buffer
    Buffered(usize),
    /// Fourth digit completed the correct code
    Accepted,
    /// Fourth digit completed a wrong code; buffer cleared
    Rejected,
    /// Keypad is already open, press ignored
    AlreadySolved,
    /// Value outside 0-9, press ignored
    NotADigit,
}

/// Sequential code-entry puzzle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keypad {
    code: [u8; CODE_LENGTH],
    entered: Vec<u8>,
    /// Latches true once the code has been entered
    solved: bool,
}

impl Keypad {
    pub fn new(code: [u8; CODE_LENGTH]) -> Self {
        Keypad {
            code,
            entered: Vec::with_capacity(CODE_LENGTH),
            solved: false,
        }
    }

    /// Append a digit. Every fourth digit is checked and the buffer cleared either way.
    pub fn press(&mut self, digit: u8) -> KeyPress {
        if digit > 9 {
            return KeyPress::NotADigit;
        }
        if self.solved {
            return KeyPress::AlreadySolved;
        }

        self.entered.push(digit);
        if self.entered.len() < CODE_LENGTH {
            return KeyPress::Buffered(self.entered.len());
        }

        let matched = self.entered[..] == self.code[..];
        self.entered.clear();

        if matched {
            self.solved = true;
            KeyPress::Accepted
        } else {
            KeyPress::Rejected
        }
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Digits typed since the last check
    pub fn entered(&self) -> &[u8] {
        &self.entered
    }

    pub fn reset(&mut self) {
        self.entered.clear();
        self.solved = false;
    }
}
