//! Entity models and their Create/Update payloads
//!
//! Row structs map 1:1 to SQLite tables (`sqlx::FromRow` behind the `db`
//! feature); inheritance hierarchies of the domain (notifications/requests,
//! menu items) are modelled as tagged unions next to their row type.

pub mod community;
pub mod dining_table;
pub mod friendship;
pub mod member;
pub mod menu_item;
pub mod notification;
pub mod post;
pub mod reservation;
pub mod restaurant;
pub mod time_slot;
pub mod user;

pub use community::{Community, CommunityCreate, CommunityDetail};
pub use dining_table::{DiningTable, DiningTableCreate};
pub use friendship::{Friend, Friendship};
pub use member::{Member, MemberWithUser};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemDetail, MenuItemRow};
pub use notification::{Notification, NotificationRow};
pub use post::{PostCreate, PostUpdate, PostWithAuthor};
pub use reservation::{
    Participant, Reservation, ReservationCreate, ReservationDetailRow, ReservationView,
};
pub use restaurant::{Restaurant, RestaurantCreate, RestaurantUpdate};
pub use time_slot::{TimeSlot, TimeSlotCreate};
pub use user::User;
