pub mod area;
pub mod country;
pub mod mock_store;
pub mod phone_number;
pub mod verification;

pub use area::AreaRepository;
pub use country::CountryRepository;
pub use mock_store::MockDirectoryStore;
pub use phone_number::PhoneNumberRepository;
pub use verification::VerificationRepository;
