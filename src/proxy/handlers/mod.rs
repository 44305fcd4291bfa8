// Handler module - API endpoint handlers

pub mod car_info;
