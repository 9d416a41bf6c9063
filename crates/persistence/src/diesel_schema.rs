// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    vessel_sailings (sailing_id) {
        sailing_id -> BigInt,
        pol_cd -> Text,
        pod_cd -> Text,
        vessel -> Text,
        voyage -> Text,
        data_version -> Integer,
        status -> Integer,
        carrier_cd -> Nullable<Text>,
        is_reference_carrier -> Nullable<Text>,
        route_cd -> Nullable<Text>,
        route_etd -> Nullable<Text>,
        eta -> Nullable<Text>,
        etd -> Nullable<Text>,
        total_duration -> Nullable<Text>,
        share_cabins -> Nullable<Text>,
        is_transit -> Nullable<Text>,
        transit_port_en -> Nullable<Text>,
        transit_port_cd -> Nullable<Text>,
        booking_cutoff -> Nullable<Text>,
        cy_open -> Nullable<Text>,
        cy_close -> Nullable<Text>,
        si_cutoff -> Nullable<Text>,
        fetch_timestamp -> BigInt,
        fetch_date -> Text,
        remark -> Nullable<Text>,
    }
}

diesel::table! {
    carrier_supplements (supplement_id) {
        supplement_id -> BigInt,
        carrier_cd -> Text,
        pol_cd -> Text,
        pod_cd -> Text,
        vessel -> Text,
        voyage -> Text,
        gp_20 -> Nullable<Text>,
        hq_40 -> Nullable<Text>,
        cut_off_time -> Nullable<Text>,
        price -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(vessel_sailings, carrier_supplements);
