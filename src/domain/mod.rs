pub mod book;
pub mod commands;
pub mod errors;
pub mod member;
pub mod rental;
pub mod value_objects;

pub use book::{Book, BookChanges, NewBook};
pub use errors::*;
pub use member::{Member, MemberChanges, NewMember};
pub use rental::{NewRental, Rental, RentalChanges};
pub use value_objects::*;
