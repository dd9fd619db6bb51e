use async_trait::async_trait;
use mockall::mock;
use portal_core::{
    models::{
        appointment::AppointmentOption,
        booking::{Booking, CreateBookingRequest},
        doctor::{CreateDoctorRequest, Doctor},
        payment::Payment,
        user::{CreateUserRequest, Role, User},
    },
    store::{AppointmentStore, BookingInsert, DoctorStore, PaymentStore, UserStore},
};
use uuid::Uuid;

// Mock store for testing failure paths
mock! {
    pub PortalStore {}

    #[async_trait]
    impl AppointmentStore for PortalStore {
        async fn fetch_all_options(&self) -> eyre::Result<Vec<AppointmentOption>>;

        async fn fetch_option_names(&self) -> eyre::Result<Vec<String>>;

        async fn find_option(&self, name: &str) -> eyre::Result<Option<AppointmentOption>>;

        async fn fetch_bookings_on(&self, appointment_date: &str) -> eyre::Result<Vec<Booking>>;

        async fn find_bookings(
            &self,
            appointment_date: &str,
            email: &str,
            treatment: &str,
        ) -> eyre::Result<Vec<Booking>>;

        async fn insert_booking(
            &self,
            booking: &CreateBookingRequest,
            price: f64,
        ) -> eyre::Result<BookingInsert>;

        async fn bookings_by_email(&self, email: &str) -> eyre::Result<Vec<Booking>>;

        async fn booking_by_id(&self, id: Uuid) -> eyre::Result<Option<Booking>>;
    }

    #[async_trait]
    impl UserStore for PortalStore {
        async fn find_user_by_email(&self, email: &str) -> eyre::Result<Option<User>>;

        async fn list_users(&self) -> eyre::Result<Vec<User>>;

        async fn insert_user(&self, user: &CreateUserRequest) -> eyre::Result<Option<User>>;

        async fn set_role(&self, id: Uuid, role: Role) -> eyre::Result<bool>;
    }

    #[async_trait]
    impl DoctorStore for PortalStore {
        async fn list_doctors(&self) -> eyre::Result<Vec<Doctor>>;

        async fn insert_doctor(&self, doctor: &CreateDoctorRequest) -> eyre::Result<Doctor>;

        async fn delete_doctor(&self, id: Uuid) -> eyre::Result<bool>;
    }

    #[async_trait]
    impl PaymentStore for PortalStore {
        async fn record_payment(
            &self,
            booking: &Booking,
            transaction_id: &str,
        ) -> eyre::Result<Option<Payment>>;
    }
}
