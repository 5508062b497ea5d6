pub mod positions;

pub use positions::parse_letters_at_positions;
