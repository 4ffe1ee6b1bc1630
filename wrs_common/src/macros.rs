/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

/* #region define_cli  ****************************************************************************************/

/// syntactic sugar macro for clap based command line interface definition
/// ```ignore
/// define_cli! { ARGS [about="my silly prog"] =
///   verbose: bool        [help="run verbose", short],
///   config: String       [help="pathname of config", long, default_value="blah"]
/// }
///
/// fn main () {
///    check_cli!(ARGS); // makes sure we exit on -h or --help (and do not execute anything until we know ARGS parsed)
///    ...
///    let config = &ARGS.config;
///    ...
/// }
/// ```
/// expands into:
/// ```ignore
/// use clap::Parser;
/// use lazy_static::lazy_static;
///
/// #[derive(Parser)]
/// #[command(about = "my silly prog")]
/// struct CliOpts {
///     #[arg(help = "run verbose", short)]
///     verbose: bool,
///
///     #[arg(help = "pathname of config", long, default_value = "blah")]
///     config: String,
///
///     #[arg(skip=true)] // hidden field to check initialization without referencing any of the arg fields
///     _initialized: bool
/// }
/// lazy_static! { static ref ARGS: CliOpts = CliOpts::parse(); }
/// ```
/// Note that the using crate needs `clap` (with "derive" feature) and `lazy_static` dependencies
#[macro_export]
macro_rules! define_cli {
    ($name:ident [ $( $sopt:ident $(= $sx:expr)? ),* ] = $( $( #[$meta:meta] )? $fname:ident : $ftype:ty [ $( $fopt:ident $(= $fx:expr)?),* ] ),* ) => {
        use clap::Parser;
        use lazy_static::lazy_static;

        #[derive(Parser)]
        #[command( $( $sopt $(=$sx)? ),* )]
        struct CliOpts {
            $(
                #[arg( $( $fopt $(=$fx)? ),* )]
                $(#[$meta])?
                $fname : $ftype,
            )*
            #[arg(skip=true)]
            _initialized: bool
        }
        lazy_static! { static ref $name: CliOpts = CliOpts::parse(); }
    }
}

#[macro_export]
macro_rules! check_cli {
    ($sopt:ident) => { { let _is_initialized = &$sopt._initialized; } }
}

/* #endregion define_cli */

/* #region impl_deserialize_struct *******************************************************************************/

/// implement serde Deserialize trait not backed by structure fields
/// This macro uses arguments to define structure name, a constructor fn name and virtual deserialization field names to
/// generate a Deserializer impl. It also supports optional aliases and default values for each field name.
/// The constructor has to accept the deserialized values in the order specified and has to return a
/// `Result<Self,E>` with `E: Display`, which is how value checks of the ctor turn into deserialization errors.
/// The constructor argument types define the respective argument deserialization
///
/// Use like so:
/// ```ignore
/// struct GeoPoint {...}
/// impl GeoPoint {
///   fn from_lat_lon_degrees (lat: f64, lon: f64)->Result<Self> {...}
/// }
///
/// impl_deserialize_struct!{ GeoPoint::from_lat_lon_degrees( lat | latitude | y, lon | longitude | x) }
/// ```
/// The caller module has to import `fmt`, `serde::de::{self,Deserialize as DeserializeTrait,Deserializer,Visitor,SeqAccess,MapAccess}`
#[macro_export]
macro_rules! impl_deserialize_struct {
    ( $type_name:ident :: $ctor_name:ident ( $( $field_name:ident $( | $alt_name:ident )*  $( = $def_val:expr )? ),+ )) => {
        impl<'de> DeserializeTrait<'de> for $type_name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<$type_name, D::Error> where D: Deserializer<'de> {
                const FIELDS: &[&str] = &[ $( stringify!($field_name) ),+ ];

                #[allow(non_camel_case_types)]
                enum Field { $( $field_name ),+ }

                impl<'de> DeserializeTrait<'de> for Field {
                    fn deserialize<D>(deserializer: D) -> std::result::Result<Field, D::Error> where D: Deserializer<'de> {
                        struct FieldVisitor;

                        impl<'de> Visitor<'de> for FieldVisitor {
                            type Value = Field;

                            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                                formatter.write_str( stringify!( $($field_name),+) )
                            }

                            fn visit_str<E>(self, value: &str) -> std::result::Result<Field, E> where E: de::Error {
                                match value {
                                    $( stringify!($field_name) $( | stringify!($alt_name) )* => Ok(Field::$field_name), )+
                                    _ => Err(de::Error::unknown_field(value, FIELDS)),
                                }
                            }
                        }
                        deserializer.deserialize_identifier(FieldVisitor)
                    }
                }

                struct TypeVisitor;

                impl<'de> Visitor<'de> for TypeVisitor {
                    type Value = $type_name;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str( stringify!( struct $type_name) )
                    }

                    fn visit_seq<V>(self, mut seq: V) -> std::result::Result< $type_name, V::Error> where V: SeqAccess<'de> {
                        $( let $field_name = seq.next_element()?.ok_or_else(|| de::Error::invalid_length( Field::$field_name as usize, &self))?; )+
                        $type_name::$ctor_name( $( $field_name ),+ ).map_err( de::Error::custom)
                    }

                    fn visit_map<V>(self, mut map: V) -> std::result::Result< $type_name, V::Error> where V: MapAccess<'de> {
                        $( let mut $field_name = None; )+

                        while let Some(key) = map.next_key()? {
                            match key {
                                $(
                                    Field::$field_name => {
                                        if $field_name .is_some() { return Err(de::Error::duplicate_field( stringify!($field_name))); }
                                        $field_name = Some(map.next_value()?);
                                    }
                                )+
                            }
                        }

                        $(
                            $( let $field_name = $field_name.or( Some($def_val) ); )?
                            let $field_name = $field_name .ok_or_else(|| de::Error::missing_field(stringify!($field_name)))?;
                        )+
                        $type_name::$ctor_name( $( $field_name ),+ ).map_err( de::Error::custom)
                    }
                }

                deserializer.deserialize_struct( stringify!($type_name), FIELDS, TypeVisitor)
            }
        }
    }
}

/* #endregion impl_deserialize_struct */
