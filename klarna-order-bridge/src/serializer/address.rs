//! Address block serialization.

use crate::{models::Address, serializer::payload::AddressPayload};

/// Maps an [`Address`] onto the provider's address block.
#[derive(Debug, Clone, Copy)]
pub struct AddressSerializer<'a> {
    address: &'a Address,
}

impl<'a> AddressSerializer<'a> {
    /// Creates a serializer for `address`.
    #[must_use]
    pub fn new(address: &'a Address) -> Self {
        Self { address }
    }

    /// Builds the address block with `email` merged in.
    #[must_use]
    pub fn to_payload(&self, email: Option<&str>) -> AddressPayload {
        let address = self.address;
        AddressPayload {
            email: email.map(str::to_owned),
            given_name: address.first_name.clone(),
            family_name: address.last_name.clone(),
            organization_name: non_blank(address.company.as_deref()),
            street_address: address.address1.clone(),
            street_address2: non_blank(address.address2.as_deref()),
            postal_code: address.zipcode.clone(),
            city: address.city.clone(),
            region: address.state.as_ref().map(|state| state.abbr.clone()),
            phone: non_blank(address.phone.as_deref()),
            country: address.country.iso.clone(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Country, State};

    fn address() -> Address {
        Address {
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            company: Some(String::new()),
            address1: "1 Main St".to_owned(),
            address2: Some("Apt 4".to_owned()),
            city: "Springfield".to_owned(),
            zipcode: "62701".to_owned(),
            phone: Some("555-1234".to_owned()),
            state: Some(State { abbr: "IL".to_owned(), name: "Illinois".to_owned() }),
            country: Country { iso: "US".to_owned() },
        }
    }

    #[test]
    fn test_address_fields() {
        let address = address();
        let payload = AddressSerializer::new(&address).to_payload(Some("jane@example.com"));

        assert_eq!(payload.email.as_deref(), Some("jane@example.com"));
        assert_eq!(payload.given_name, "Jane");
        assert_eq!(payload.family_name, "Doe");
        assert_eq!(payload.street_address, "1 Main St");
        assert_eq!(payload.street_address2.as_deref(), Some("Apt 4"));
        assert_eq!(payload.region.as_deref(), Some("IL"));
        assert_eq!(payload.country, "US");
    }

    #[test]
    fn test_blank_optional_fields_serialize_as_null() {
        let mut address = address();
        address.phone = Some("  ".to_owned());

        let payload = AddressSerializer::new(&address).to_payload(None);

        assert!(payload.email.is_none());
        assert!(payload.organization_name.is_none());
        assert!(payload.phone.is_none());

        let value = serde_json::to_value(&payload).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("phone"));
        assert!(object["phone"].is_null());
        assert!(object["email"].is_null());
    }
}
