// Input module - Controller button state
//
// Polling a keyboard or gamepad happens outside the core. The host fills in a
// Controller and hands it to the bus, which latches it into the serial shift
// register read through $4016/$4017.

/// One of the eight buttons on a standard NES controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// All buttons in the order the shift register reports them
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    /// Bit of this button in the latched byte (A is shifted out first)
    pub fn mask(self) -> u8 {
        match self {
            Button::A => 0x80,
            Button::B => 0x40,
            Button::Select => 0x20,
            Button::Start => 0x10,
            Button::Up => 0x08,
            Button::Down => 0x04,
            Button::Left => 0x02,
            Button::Right => 0x01,
        }
    }
}

/// Controller structure representing NES controller state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controller {
    // Button states
    pub button_a: bool,
    pub button_b: bool,
    pub select: bool,
    pub start: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Controller {
    /// Create a new controller instance with all buttons released
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `button` is held
    pub fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::A => self.button_a,
            Button::B => self.button_b,
            Button::Select => self.select,
            Button::Start => self.start,
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
        }
    }

    /// Press or release `button`
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        let slot = match button {
            Button::A => &mut self.button_a,
            Button::B => &mut self.button_b,
            Button::Select => &mut self.select,
            Button::Start => &mut self.start,
            Button::Up => &mut self.up,
            Button::Down => &mut self.down,
            Button::Left => &mut self.left,
            Button::Right => &mut self.right,
        };
        *slot = pressed;
    }

    /// Pack the buttons into the byte the bus latches on a strobe write
    ///
    /// Layout: A=0x80, B=0x40, Select=0x20, Start=0x10, Up=0x08, Down=0x04,
    /// Left=0x02, Right=0x01.
    pub fn to_byte(&self) -> u8 {
        Button::ALL
            .iter()
            .filter(|&&button| self.is_pressed(button))
            .fold(0, |byte, &button| byte | button.mask())
    }

    /// Inverse of [`Controller::to_byte`]
    pub fn from_byte(byte: u8) -> Self {
        let mut controller = Self::new();
        for button in Button::ALL {
            controller.set_button(button, byte & button.mask() != 0);
        }
        controller
    }
}
