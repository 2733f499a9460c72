use crate::domain::value::{Address, MessageText, SenderAddress};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One outbound SMS: sent from `sender` to a single `destination`.
pub struct SendSms {
    sender: SenderAddress,
    destination: Address,
    text: MessageText,
}

impl SendSms {
    pub fn new(sender: SenderAddress, destination: Address, text: MessageText) -> Self {
        Self {
            sender,
            destination,
            text,
        }
    }

    pub fn sender(&self) -> &SenderAddress {
        &self.sender
    }

    pub fn destination(&self) -> &Address {
        &self.destination
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}
