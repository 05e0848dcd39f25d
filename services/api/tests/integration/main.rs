mod auth_test;
mod car_test;
mod favorite_test;
mod helpers;
mod review_test;
mod router_test;
