mod rental_service;

pub use rental_service::{
    RentalClosed, close_rental, get_rental, list_rentals, open_rental, update_rental,
};
