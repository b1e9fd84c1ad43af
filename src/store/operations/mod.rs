pub mod chats;
pub mod sentences;
pub mod users;
pub mod vocabularies;
pub mod words;
