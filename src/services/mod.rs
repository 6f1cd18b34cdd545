pub mod binance;
pub mod jsonl;
