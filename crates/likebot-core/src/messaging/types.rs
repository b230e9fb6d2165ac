/// Inline keyboard (buttons) attached to a message.
#[derive(Clone, Debug)]
pub struct InlineKeyboard {
    pub buttons: Vec<InlineButton>,
}

#[derive(Clone, Debug)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

impl InlineKeyboard {
    pub fn new(buttons: Vec<InlineButton>) -> Self {
        Self { buttons }
    }

    /// The like button: label `"<count> 😂"`, callback payload the decimal
    /// count. The only markup this bot ever sends.
    pub fn like_button(count: i64) -> Self {
        Self::new(vec![InlineButton {
            label: format!("{count} 😂"),
            callback_data: count.to_string(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_button_renders_count_and_payload() {
        let kb = InlineKeyboard::like_button(3);
        assert_eq!(kb.buttons.len(), 1);
        assert_eq!(kb.buttons[0].label, "3 😂");
        assert_eq!(kb.buttons[0].callback_data, "3");
    }

    #[test]
    fn fresh_post_button_shows_zero() {
        let kb = InlineKeyboard::like_button(0);
        assert_eq!(kb.buttons[0].label, "0 😂");
        assert_eq!(kb.buttons[0].callback_data, "0");
    }
}
