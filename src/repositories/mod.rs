//! Repositories - query layer
//!
//! Lecturas bulk contra PostgreSQL. El aggregation engine solo consume
//! los row sets que devuelven estos repositories; nunca muta entidades.

pub mod booking_repository;
pub mod driver_repository;
pub mod testimonial_repository;
pub mod vehicle_repository;

pub use booking_repository::BookingRepository;
pub use driver_repository::DriverRepository;
pub use testimonial_repository::TestimonialRepository;
pub use vehicle_repository::VehicleRepository;
