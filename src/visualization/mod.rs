mod gauge;
mod tables;

pub use gauge::{format_tank_gauge, print_tank_gauge, GaugeReading};
pub use tables::{
    format_batch_table, print_batch_table,
    format_height_table, print_height_table,
    format_pcf_table, print_pcf_table,
    format_result_card, print_result_card,
    format_scf_table, print_scf_table,
    format_vcf_table, print_vcf_table,
};
