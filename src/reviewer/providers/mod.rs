pub mod flowise;
