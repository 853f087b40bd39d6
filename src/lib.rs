//! Scraper for the Reserve Bank of Zimbabwe daily exchange-rate bulletins.
//!
//! Discovers one month of bulletin PDFs at a time from the RBZ listing
//! site, pulls the USD mid-rate out of each bulletin with a line-scanning
//! heuristic tailored to the publisher's layout, and writes the collected
//! rates to a single date-sorted CSV.

pub mod extract;
pub mod fetch;
pub mod period;
pub mod table;
